// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function is a dispatcher; the handlers live in the
//! `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::ui`: context pages, links, toasts
//! - `handlers::permissions`: camera and storage grants
//! - `handlers::capture`: camera selection, frames, shutter, flash
//! - `handlers::roll`: import, preview, removal, export, thumbnails
//! - `handlers::system`: settings and configuration

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        let task = match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::CloseToast(id) => self.handle_close_toast(id),

            // ===== Permissions =====
            Message::CameraPermission(granted) => self.handle_camera_permission(granted),
            Message::StoragePermission(granted) => self.handle_storage_permission(granted),

            // ===== Camera =====
            Message::CamerasInitialized(cameras) => self.handle_cameras_initialized(cameras),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::CameraFailed(reason) => self.handle_camera_failed(reason),
            Message::SelectCamera(index) => self.handle_select_camera(index),

            // ===== Capture =====
            Message::Capture => self.handle_capture(),
            Message::FlashComplete => self.handle_flash_complete(),
            Message::CaptureFinished(result) => self.handle_capture_finished(result),
            Message::CycleFlash => self.handle_cycle_flash(),

            // ===== Roll =====
            Message::ImportImage => self.handle_import_image(),
            Message::ImagePicked(path) => self.handle_image_picked(path),
            Message::ImportFinished(result) => self.handle_import_finished(result),
            Message::PreviewImage(path) => self.handle_preview_image(path),
            Message::DismissPreview => self.handle_dismiss_preview(),
            Message::PreviewTimeout(epoch) => self.handle_preview_timeout(epoch),
            Message::RemoveImage(path) => self.handle_remove_image(path),
            Message::ImageRemoved(path, result) => self.handle_image_removed(path, result),
            Message::ExportImage(path) => self.handle_export_image(path),
            Message::ImageExported(result) => self.handle_image_exported(result),
            Message::ThumbnailLoaded(path, result) => self.handle_thumbnail_loaded(path, result),

            // ===== Settings =====
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
            Message::SelectLens(index) => self.handle_select_lens(index),
            Message::SelectFlashMode(index) => self.handle_select_flash_mode(index),
            Message::SelectImageFormat(index) => self.handle_select_image_format(index),
            Message::SelectExportDirectory(index) => self.handle_select_export_directory(index),
            Message::SelectPreviewDelay(index) => self.handle_select_preview_delay(index),

            // ===== System =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
        };

        // Errors live in the state only until they are shown
        Task::batch([task, self.surface_error()])
    }
}
