// SPDX-License-Identifier: GPL-3.0-only

//! Application state management
//!
//! [`ViewState`] is the single record the screen renders from. Every user
//! action and every finished background task produces a new one; handlers
//! never patch fields in place.

use crate::backends::camera::types::{CameraDevice, CameraFrame};
use crate::backends::camera::CameraController;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::storage::{FileManager, Thumbnail};
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use cosmic::widget::{self, image};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything the screen needs to render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub camera_permission: bool,
    pub storage_permission: bool,
    /// Open camera, if any
    pub camera: Option<CameraController>,
    /// Image shown full screen instead of the viewfinder
    pub current_preview: Option<PathBuf>,
    /// Captured and imported images, oldest first, no duplicates
    pub roll: Vec<PathBuf>,
    /// A capture is in flight
    pub is_loading: bool,
    /// Failure waiting to be shown to the user
    pub error: Option<String>,
}

impl ViewState {
    pub fn with_camera_permission(self, granted: bool) -> Self {
        Self {
            camera_permission: granted,
            ..self
        }
    }

    pub fn with_storage_permission(self, granted: bool) -> Self {
        Self {
            storage_permission: granted,
            ..self
        }
    }

    pub fn with_camera(self, camera: CameraController) -> Self {
        Self {
            camera: Some(camera),
            ..self
        }
    }

    pub fn without_camera(self) -> Self {
        Self {
            camera: None,
            ..self
        }
    }

    pub fn capture_started(self) -> Self {
        Self {
            is_loading: true,
            error: None,
            ..self
        }
    }

    /// Add the new image to the roll and preview it
    pub fn capture_succeeded(self, path: PathBuf) -> Self {
        Self {
            is_loading: false,
            ..self.add_to_roll(path)
        }
    }

    pub fn capture_failed(self, message: impl Into<String>) -> Self {
        Self {
            is_loading: false,
            ..self.failed(message)
        }
    }

    pub fn import_succeeded(self, path: PathBuf) -> Self {
        self.add_to_roll(path)
    }

    pub fn import_failed(self, message: impl Into<String>) -> Self {
        self.failed(message)
    }

    pub fn remove_failed(self, message: impl Into<String>) -> Self {
        self.failed(message)
    }

    pub fn export_failed(self, message: impl Into<String>) -> Self {
        self.failed(message)
    }

    /// Preview a roll entry; paths outside the roll are ignored
    pub fn preview(self, path: PathBuf) -> Self {
        if !self.roll.contains(&path) {
            return self;
        }
        Self {
            current_preview: Some(path),
            ..self
        }
    }

    pub fn dismiss_preview(self) -> Self {
        Self {
            current_preview: None,
            ..self
        }
    }

    /// Drop one roll entry, and the preview if it showed that entry
    pub fn removed(mut self, path: &PathBuf) -> Self {
        if let Some(index) = self.roll.iter().position(|p| p == path) {
            self.roll.remove(index);
        }
        if self.current_preview.as_ref() == Some(path) {
            self.current_preview = None;
        }
        self
    }

    pub fn clear_error(self) -> Self {
        Self {
            error: None,
            ..self
        }
    }

    pub fn is_previewing(&self) -> bool {
        self.current_preview.is_some()
    }

    /// Whether the shutter accepts a press
    pub fn can_capture(&self) -> bool {
        !self.is_loading && self.camera.is_some()
    }

    fn add_to_roll(mut self, path: PathBuf) -> Self {
        if !self.roll.contains(&path) {
            self.roll.push(path.clone());
        }
        self.current_preview = Some(path);
        self
    }

    fn failed(self, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            message
        };
        Self {
            error: Some(message),
            ..self
        }
    }
}

/// User-facing text for a failed capture
///
/// Encoding and camera failures read "Image capture failed", failures to
/// write the file read "Failed to save image".
pub fn capture_error_message(error: &AppError) -> String {
    match error {
        AppError::Storage(e) => format!("Failed to save image: {}", e),
        AppError::Camera(e) => format!("Image capture failed: {}", e),
    }
}

/// Generation counter for the preview auto-dismiss timer
///
/// Every armed timer carries the epoch it was armed with. Only a timeout
/// whose epoch is still current may close the preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewTimer {
    epoch: u64,
}

impl PreviewTimer {
    /// Start a new generation and return its epoch
    pub fn arm(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }

    /// Invalidate any timer in flight without arming a new one
    pub fn cancel(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Messages emitted by the application and its widgets.
///
/// Messages are organized into logical groups:
/// - **UI Navigation**: context pages, links, toasts
/// - **Permissions**: results of permission requests
/// - **Camera**: enumeration, frames, selection
/// - **Capture**: shutter, flash, save results
/// - **Roll**: import, preview, removal, export, thumbnails
/// - **Settings**: preferences in the settings drawer
/// - **System**: configuration updates
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About, Settings)
    ToggleContextPage(ContextPage),
    /// A toast was closed or timed out
    CloseToast(widget::ToastId),

    // ===== Permissions =====
    CameraPermission(bool),
    StoragePermission(bool),

    // ===== Camera =====
    /// Cameras enumerated asynchronously during startup
    CamerasInitialized(Vec<CameraDevice>),
    /// New viewfinder frame
    CameraFrame(Arc<CameraFrame>),
    /// The viewfinder pipeline could not start
    CameraFailed(String),
    /// Select specific camera by index
    SelectCamera(usize),

    // ===== Capture =====
    /// Shutter pressed
    Capture,
    /// Screen flash shown long enough, take the picture
    FlashComplete,
    /// Capture and save finished
    CaptureFinished(AppResult<PathBuf>),
    /// Cycle Off -> On -> Auto
    CycleFlash,

    // ===== Roll =====
    /// Open the system file picker
    ImportImage,
    /// File picker closed (None when cancelled)
    ImagePicked(Option<PathBuf>),
    ImportFinished(Result<PathBuf, String>),
    PreviewImage(PathBuf),
    DismissPreview,
    /// Auto-dismiss timer fired for the given preview generation
    PreviewTimeout(u64),
    RemoveImage(PathBuf),
    ImageRemoved(PathBuf, Result<(), String>),
    /// Copy the previewed image to the export directory
    ExportImage(PathBuf),
    ImageExported(Result<PathBuf, String>),
    ThumbnailLoaded(PathBuf, Result<Thumbnail, String>),

    // ===== Settings =====
    SetAppTheme(usize),
    SelectLens(usize),
    SelectFlashMode(usize),
    SelectImageFormat(usize),
    SelectExportDirectory(usize),
    SelectPreviewDelay(usize),

    // ===== System =====
    UpdateConfig(Config),
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Config handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,

    /// Screen state, replaced whole on every change
    pub state: ViewState,
    /// Capture cache
    pub files: FileManager,
    /// Transient notifications
    pub toasts: widget::toaster::Toasts<Message>,

    // ===== Camera =====
    pub available_cameras: Vec<CameraDevice>,
    pub current_camera_index: usize,
    /// Latest viewfinder frame ready for display
    pub viewfinder: Option<image::Handle>,
    /// White screen shown in place of a flash LED
    pub flash_active: bool,

    // ===== Roll =====
    /// Decoded roll tiles keyed by path
    pub thumbnails: HashMap<PathBuf, image::Handle>,
    /// Auto-dismiss generation for the preview on screen
    pub preview_timer: PreviewTimer,

    // ===== Settings dropdowns =====
    pub camera_dropdown_options: Vec<String>,
    pub theme_dropdown_options: Vec<String>,
    pub lens_dropdown_options: Vec<String>,
    pub flash_dropdown_options: Vec<String>,
    pub format_dropdown_options: Vec<String>,
    pub directory_dropdown_options: Vec<String>,
    pub preview_delay_dropdown_options: Vec<String>,
}

impl AppModel {
    /// Swap in the state produced by `reduce`
    pub(crate) fn reduce(&mut self, reduce: impl FnOnce(ViewState) -> ViewState) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state);
    }

    pub(crate) fn current_camera(&self) -> Option<&CameraDevice> {
        self.available_cameras.get(self.current_camera_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::types::CameraConfiguration;
    use crate::errors::{CameraError, StorageError};
    use std::path::Path;

    fn roll_of(names: &[&str]) -> ViewState {
        names.iter().fold(ViewState::default(), |state, name| {
            state.import_succeeded(PathBuf::from(name))
        })
    }

    fn controller() -> CameraController {
        CameraController::new(CameraDevice::default_camera(), CameraConfiguration::default())
    }

    #[test]
    fn test_permission_flags_are_independent() {
        let before = roll_of(&["a.jpg"]).with_camera(controller());
        let after = before.clone().with_camera_permission(true);

        assert!(after.camera_permission);
        assert!(!after.storage_permission);
        assert_eq!(
            after.clone().with_camera_permission(false),
            before.clone().with_camera_permission(false)
        );

        let storage = before.clone().with_storage_permission(true);
        assert!(storage.storage_permission);
        assert!(!storage.camera_permission);
        assert_eq!(storage.roll, before.roll);
        assert_eq!(storage.camera, before.camera);
    }

    #[test]
    fn test_capture_success_appends_and_previews() {
        let state = roll_of(&["a.jpg"]).dismiss_preview().capture_started();
        assert!(state.is_loading);

        let state = state.capture_succeeded(PathBuf::from("b.jpg"));
        assert_eq!(state.roll, vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]);
        assert_eq!(state.current_preview, Some(PathBuf::from("b.jpg")));
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_capture_failure_keeps_roll() {
        let before = roll_of(&["a.jpg", "b.jpg"]);
        let after = before.clone().capture_started().capture_failed("");

        assert_eq!(after.roll, before.roll);
        assert!(!after.is_loading);
        assert!(after.error.as_deref().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn test_capture_started_clears_previous_error() {
        let state = ViewState::default()
            .import_failed("Failed to import image: nope")
            .capture_started();
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_roll_stays_unique() {
        let state = roll_of(&["a.jpg"]).import_succeeded(PathBuf::from("a.jpg"));
        assert_eq!(state.roll.len(), 1);
        assert_eq!(state.current_preview, Some(PathBuf::from("a.jpg")));
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let state = roll_of(&["a.jpg", "b.jpg", "c.jpg"]).removed(&PathBuf::from("b.jpg"));
        assert_eq!(state.roll, vec![PathBuf::from("a.jpg"), PathBuf::from("c.jpg")]);
    }

    #[test]
    fn test_remove_previewed_entry_closes_preview() {
        let state = roll_of(&["a.jpg", "b.jpg"]);
        assert_eq!(state.current_preview, Some(PathBuf::from("b.jpg")));

        let state = state.removed(&PathBuf::from("b.jpg"));
        assert_eq!(state.current_preview, None);

        let state = roll_of(&["a.jpg", "b.jpg"]).removed(&PathBuf::from("a.jpg"));
        assert_eq!(state.current_preview, Some(PathBuf::from("b.jpg")));
    }

    #[test]
    fn test_remove_unknown_path_is_noop() {
        let before = roll_of(&["a.jpg"]);
        let after = before.clone().removed(&PathBuf::from("zzz.jpg"));
        assert_eq!(after, before);
    }

    #[test]
    fn test_dismiss_preview_keeps_roll() {
        let before = roll_of(&["a.jpg", "b.jpg"]);
        let after = before.clone().dismiss_preview();
        assert_eq!(after.current_preview, None);
        assert_eq!(after.roll, before.roll);
    }

    #[test]
    fn test_preview_ignores_paths_outside_roll() {
        let state = roll_of(&["a.jpg"]).dismiss_preview();
        let state = state.preview(PathBuf::from("/etc/passwd"));
        assert_eq!(state.current_preview, None);

        let state = state.preview(PathBuf::from("a.jpg"));
        assert_eq!(state.current_preview.as_deref(), Some(Path::new("a.jpg")));
    }

    #[test]
    fn test_camera_handle_swaps() {
        let state = ViewState::default().with_camera(controller());
        assert!(state.can_capture());
        let state = state.capture_started();
        assert!(!state.can_capture());
        let state = state.without_camera();
        assert!(state.camera.is_none());
    }

    #[test]
    fn test_capture_error_wording() {
        let camera = capture_error_message(&CameraError::NoFrameAvailable.into());
        assert!(camera.starts_with("Image capture failed: "));

        let storage = capture_error_message(
            &StorageError::write(Path::new("/cache/IMG_1.jpg"), "disk full").into(),
        );
        assert!(storage.starts_with("Failed to save image: "));
        assert!(storage.contains("disk full"));
    }

    #[test]
    fn test_stale_preview_timer_is_ignored() {
        let mut timer = PreviewTimer::default();
        let first = timer.arm();
        assert!(timer.is_current(first));

        let second = timer.arm();
        assert!(!timer.is_current(first));
        assert!(timer.is_current(second));
    }

    #[test]
    fn test_previewing_again_restarts_timer() {
        let mut timer = PreviewTimer::default();
        let state = roll_of(&["a.jpg", "b.jpg"]);
        let shown_a = timer.arm();

        let state = state.preview(PathBuf::from("b.jpg"));
        assert!(state.is_previewing());
        let shown_b = timer.arm();

        // The timer armed for a.jpg fires but b.jpg stays up
        assert!(!timer.is_current(shown_a));
        assert!(timer.is_current(shown_b));
    }

    #[test]
    fn test_timer_rearms_after_export() {
        let mut timer = PreviewTimer::default();
        let before_save = timer.arm();

        // Save pauses the countdown while the copy runs
        timer.cancel();
        assert!(!timer.is_current(before_save));
        let paused = timer.epoch();

        // A failed copy keeps the preview open, so the timer comes back
        let state = roll_of(&["a.jpg"]).export_failed("Failed to save image: full");
        assert!(state.is_previewing());
        let after_save = timer.arm();
        assert_ne!(after_save, paused);
        assert!(timer.is_current(after_save));
    }

    #[test]
    fn test_dismiss_cancels_timer() {
        let mut timer = PreviewTimer::default();
        let armed = timer.arm();
        timer.cancel();
        assert!(!timer.is_current(armed));
    }
}
