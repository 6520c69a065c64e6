// SPDX-License-Identifier: MPL-2.0

//! Main application module
//!
//! # Architecture
//!
//! - `state`: `ViewState` reducer, `AppModel`, `Message`
//! - `camera_preview`: live viewfinder
//! - `preview_overlay`: full-screen image preview
//! - `camera_roll`: thumbnail strip
//! - `controls`: shutter button and the bottom controls row
//! - `settings`: settings drawer UI
//! - `handlers`: message handlers grouped by domain
//! - `view`: main view composition
//! - `update`: message dispatch

mod camera_preview;
mod camera_roll;
mod controls;
mod handlers;
mod preview_overlay;
pub mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera::{self, CameraController, FrameReceiver, PreviewStream, select_device};
use crate::config::Config;
use crate::constants::{app_info, pipeline};
use crate::fl;
use crate::permissions::PermissionManager;
use crate::storage::FileManager;
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, ContextPage, Message, PreviewTimer, ViewState, capture_error_message};
use std::sync::Arc;
use tracing::{error, info, warn};

const REPOSITORY: &str = "https://github.com/shutter-app/shutter";

/// Delay before retrying a viewfinder that failed to start
const VIEWFINDER_RETRY_SECS: u64 = 5;

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = app_info::APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_name(Self::APP_ID))
            .version(app_info::version())
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        // Initialize GStreamer early (required before any GStreamer calls)
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let files = FileManager::default();
        info!(
            cache = %files.cache_dir().display(),
            runtime = app_info::runtime_environment(),
            "Using capture cache"
        );

        let mut app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            state: ViewState::default(),
            files: files.clone(),
            toasts: widget::toaster::Toasts::new(Message::CloseToast),
            available_cameras: Vec::new(),
            current_camera_index: 0,
            viewfinder: None,
            flash_active: false,
            thumbnails: Default::default(),
            preview_timer: PreviewTimer::default(),
            camera_dropdown_options: Vec::new(),
            theme_dropdown_options: Vec::new(),
            lens_dropdown_options: Vec::new(),
            flash_dropdown_options: Vec::new(),
            format_dropdown_options: Vec::new(),
            directory_dropdown_options: Vec::new(),
            preview_delay_dropdown_options: Vec::new(),
        };
        app.update_settings_options();

        // Enumerate cameras off the UI thread (pw-cli can be slow)
        let init_task = Task::perform(
            async move {
                tokio::task::spawn_blocking(|| camera::get_backend().enumerate_cameras())
                    .await
                    .unwrap_or_else(|e| {
                        error!(error = %e, "Camera enumeration task failed");
                        Vec::new()
                    })
            },
            |cameras| cosmic::Action::App(Message::CamerasInitialized(cameras)),
        );

        let permissions = PermissionManager::new(files);
        let permission_tasks = Task::batch([
            app.request_camera_permission_task(permissions.clone()),
            app.request_storage_permission_task(permissions, true),
        ]);

        (app, Task::batch([init_task, permission_tasks]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        let viewfinder_sub = match (&self.state.camera, self.state.camera_permission) {
            (Some(controller), true) => viewfinder_subscription(controller.clone()),
            _ => Subscription::none(),
        };

        Subscription::batch([config_sub, viewfinder_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}

impl AppModel {
    /// Open the selected camera, or retune the open one if it is the same device
    ///
    /// Reusing the controller keeps its frame slot, which the running
    /// viewfinder subscription publishes into.
    pub(crate) fn open_camera(&mut self) {
        let Some(device) = self.current_camera().cloned() else {
            warn!("No camera to open");
            self.reduce(ViewState::without_camera);
            self.viewfinder = None;
            return;
        };

        let configuration = self.config.camera_configuration();
        let controller = match &self.state.camera {
            Some(open) if open.device().path == device.path => {
                open.with_configuration(configuration)
            }
            _ => {
                info!(name = %device.name, path = %device.path, "Opening camera");
                self.viewfinder = None;
                CameraController::new(device, configuration)
            }
        };
        self.reduce(|state| state.with_camera(controller));
    }

    /// Index of the camera to start with
    pub(crate) fn initial_camera_index(&self) -> usize {
        if let Some(last_path) = &self.config.last_camera_path
            && let Some(index) = self
                .available_cameras
                .iter()
                .position(|cam| &cam.path == last_path)
        {
            info!(path = %last_path, index, "Restoring last camera");
            return index;
        }

        select_device(&self.available_cameras, self.config.lens)
            .and_then(|device| {
                self.available_cameras
                    .iter()
                    .position(|cam| cam.path == device.path)
            })
            .unwrap_or(0)
    }
}

/// Stream frames from the controller's camera for as long as the key holds
///
/// Keyed by device path, so switching cameras tears the pipeline down and
/// starts a new one. Frames go into the controller's capture slot and to the
/// UI for display.
fn viewfinder_subscription(controller: CameraController) -> Subscription<Message> {
    use cosmic::iced::futures::{SinkExt, StreamExt};

    let device = controller.device().clone();

    Subscription::run_with_id(
        ("viewfinder", device.path.clone()),
        cosmic::iced::stream::channel(pipeline::FRAME_CHANNEL_CAPACITY, move |mut output| async move {
            info!(name = %device.name, "Viewfinder subscription started");
            let backend = camera::get_backend();
            let mut reported_failure = false;

            loop {
                let (sender, mut receiver): (_, FrameReceiver) =
                    cosmic::iced::futures::channel::mpsc::channel(pipeline::FRAME_CHANNEL_CAPACITY);

                let stream = match backend.start_preview(&device, sender) {
                    Ok(stream) => stream,
                    Err(e) => {
                        error!(error = %e, "Failed to start viewfinder");
                        if !reported_failure {
                            reported_failure = true;
                            if output.send(Message::CameraFailed(e.to_string())).await.is_err() {
                                break;
                            }
                        }
                        tokio::time::sleep(std::time::Duration::from_secs(VIEWFINDER_RETRY_SECS))
                            .await;
                        continue;
                    }
                };
                reported_failure = false;

                while let Some(frame) = receiver.next().await {
                    controller.publish_frame(frame.clone());

                    // Dropping frames is fine for a live view
                    if let Err(e) = output.try_send(Message::CameraFrame(Arc::new(frame)))
                        && e.is_disconnected()
                    {
                        info!("Viewfinder output closed");
                        return;
                    }
                }

                info!(device = %stream.device().name, "Viewfinder stream ended, restarting");
                drop(stream);
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
        }),
    )
}
