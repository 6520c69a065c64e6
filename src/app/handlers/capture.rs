// SPDX-License-Identifier: GPL-3.0-only

//! Camera and capture handlers
//!
//! Handles camera selection, viewfinder frames, the shutter and the flash.

use crate::app::state::{AppModel, Message, ViewState, capture_error_message};
use crate::backends::camera::types::{CameraDevice, CameraFrame};
use crate::constants::timing;
use crate::errors::AppResult;
use crate::fl;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::widget::image;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

impl AppModel {
    /// Create a delayed task that sends a message after `delay`
    pub(crate) fn delay_task(delay: Duration, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(delay).await;
                message
            },
            cosmic::Action::App,
        )
    }

    // =========================================================================
    // Camera Handlers
    // =========================================================================

    pub(crate) fn handle_cameras_initialized(
        &mut self,
        cameras: Vec<CameraDevice>,
    ) -> Task<cosmic::Action<Message>> {
        info!(count = cameras.len(), "Cameras initialized");
        self.available_cameras = cameras;
        self.current_camera_index = self.initial_camera_index();
        self.update_camera_options();

        if self.available_cameras.is_empty() {
            self.reduce(ViewState::without_camera);
            return self.push_toast(fl!("no-camera"));
        }
        self.open_camera();
        Task::none()
    }

    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        if self.state.camera.is_none() {
            return Task::none();
        }
        let Some(rgba) = frame.complete_rgba() else {
            debug!(
                width = frame.width,
                height = frame.height,
                len = frame.data.len(),
                "Dropping truncated frame"
            );
            return Task::none();
        };
        self.viewfinder = Some(image::Handle::from_rgba(frame.width, frame.height, rgba));
        Task::none()
    }

    pub(crate) fn handle_camera_failed(&mut self, reason: String) -> Task<cosmic::Action<Message>> {
        error!(reason = %reason, "Camera unavailable");
        self.push_toast(fl!("camera-failed", reason = reason))
    }

    pub(crate) fn handle_select_camera(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(device) = self.available_cameras.get(index) else {
            warn!(index, "Camera index out of range");
            return Task::none();
        };
        info!(index, name = %device.name, "Selecting camera");

        self.config.last_camera_path = Some(device.path.clone());
        self.current_camera_index = index;
        self.save_config("last camera");
        self.open_camera();
        Task::none()
    }

    // =========================================================================
    // Capture Handlers
    // =========================================================================

    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        if let Err(request) = self.ensure_permissions(true) {
            return request;
        }

        let Some(controller) = self.state.camera.as_ref() else {
            info!("No camera open, ignoring shutter");
            return Task::none();
        };

        if !self.state.can_capture() || self.flash_active {
            debug!("Capture already in progress");
            return Task::none();
        }

        if controller.should_fire_flash() {
            info!(mode = ?self.config.flash, "Flash - showing white screen before capture");
            self.flash_active = true;
            return Self::delay_task(timing::FLASH_DURATION, Message::FlashComplete);
        }

        self.capture_photo()
    }

    pub(crate) fn handle_flash_complete(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Flash complete - capturing photo");
        let task = self.capture_photo();
        self.flash_active = false;
        task
    }

    /// Take the picture and write it to the cache
    fn capture_photo(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(controller) = self.state.camera.clone() else {
            return Task::none();
        };
        let files = self.files.clone();

        info!("Capturing photo...");
        self.reduce(ViewState::capture_started);

        Task::perform(
            async move {
                let image = controller.take_picture().await?;
                let path = files.create_image_file(&image.bytes, image.format).await?;
                AppResult::Ok(path)
            },
            |result| cosmic::Action::App(Message::CaptureFinished(result)),
        )
    }

    pub(crate) fn handle_capture_finished(
        &mut self,
        result: AppResult<PathBuf>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(path) => {
                info!(path = %path.display(), "Photo saved");
                self.reduce(|state| state.capture_succeeded(path.clone()));
                Task::batch([self.start_preview_timer(), self.load_thumbnail_task(path)])
            }
            Err(err) => {
                error!(error = %err, "Capture failed");
                let message = capture_error_message(&err);
                self.reduce(|state| state.capture_failed(message));
                Task::none()
            }
        }
    }

    pub(crate) fn handle_cycle_flash(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.flash = self.config.flash.next();
        info!(flash = ?self.config.flash, "Flash mode changed");
        self.save_config("flash mode");
        self.open_camera();
        Task::none()
    }

    /// Persist the config, logging what was being saved on failure
    pub(crate) fn save_config(&self, what: &str) {
        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, setting = what, "Failed to save setting");
        }
    }
}
