// SPDX-License-Identifier: GPL-3.0-only

//! System handlers
//!
//! Handles settings changes and configuration updates.

use crate::app::state::{AppModel, Message};
use crate::backends::camera::select_device;
use crate::backends::camera::types::{CameraLens, Directory, FlashMode, ImageFormat};
use crate::config::{AppTheme, Config};
use crate::constants::ui;
use crate::fl;
use cosmic::Task;
use tracing::{info, warn};

impl AppModel {
    // =========================================================================
    // Settings Handlers
    // =========================================================================

    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        if self.config == config {
            return Task::none();
        }
        self.config = config;
        self.open_camera();
        Task::none()
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(&app_theme) = AppTheme::ALL.get(index) else {
            return Task::none();
        };

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;
        self.save_config("app theme");

        cosmic::command::set_theme(app_theme.theme())
    }

    pub(crate) fn handle_select_lens(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(&lens) = CameraLens::ALL.get(index) else {
            return Task::none();
        };

        info!(?lens, "Lens selected");
        self.config.lens = lens;

        if let Some(device) = select_device(&self.available_cameras, lens).cloned()
            && let Some(position) = self
                .available_cameras
                .iter()
                .position(|cam| cam.path == device.path)
        {
            self.current_camera_index = position;
            self.config.last_camera_path = Some(device.path);
        } else {
            warn!(?lens, "No camera matches lens, keeping current camera");
        }

        self.save_config("lens");
        self.open_camera();
        Task::none()
    }

    pub(crate) fn handle_select_flash_mode(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(&flash) = FlashMode::ALL.get(index) else {
            return Task::none();
        };
        info!(?flash, "Flash mode selected");
        self.config.flash = flash;
        self.save_config("flash mode");
        self.open_camera();
        Task::none()
    }

    pub(crate) fn handle_select_image_format(
        &mut self,
        index: usize,
    ) -> Task<cosmic::Action<Message>> {
        let Some(&format) = ImageFormat::ALL.get(index) else {
            return Task::none();
        };
        info!(?format, "Image format selected");
        self.config.image_format = format;
        self.save_config("image format");
        self.open_camera();
        Task::none()
    }

    pub(crate) fn handle_select_export_directory(
        &mut self,
        index: usize,
    ) -> Task<cosmic::Action<Message>> {
        let Some(&directory) = Directory::ALL.get(index) else {
            return Task::none();
        };
        info!(?directory, path = %directory.path().display(), "Export directory selected");
        self.config.export_directory = directory;
        self.save_config("export directory");
        self.open_camera();
        Task::none()
    }

    pub(crate) fn handle_select_preview_delay(
        &mut self,
        index: usize,
    ) -> Task<cosmic::Action<Message>> {
        let Some(&secs) = ui::PREVIEW_DELAY_CHOICES.get(index) else {
            return Task::none();
        };
        info!(secs, "Preview delay selected");
        self.config.preview_dismiss_secs = secs;
        self.save_config("preview delay");
        Task::none()
    }

    // =========================================================================
    // Dropdown labels
    // =========================================================================

    /// Fill the settings dropdown labels
    pub(crate) fn update_settings_options(&mut self) {
        self.theme_dropdown_options = vec![
            fl!("match-desktop"),
            fl!("dark"),
            fl!("light"),
        ];
        self.lens_dropdown_options = CameraLens::ALL
            .iter()
            .map(|lens| match lens {
                CameraLens::Back => fl!("lens-back"),
                CameraLens::Front => fl!("lens-front"),
            })
            .collect();
        self.flash_dropdown_options = FlashMode::ALL
            .iter()
            .map(|mode| match mode {
                FlashMode::Off => fl!("flash-off"),
                FlashMode::On => fl!("flash-on"),
                FlashMode::Auto => fl!("flash-auto"),
            })
            .collect();
        self.format_dropdown_options = ImageFormat::ALL
            .iter()
            .map(|format| match format {
                ImageFormat::Jpeg => "JPEG".to_string(),
                ImageFormat::Png => "PNG".to_string(),
            })
            .collect();
        self.directory_dropdown_options = Directory::ALL
            .iter()
            .map(|dir| match dir {
                Directory::Pictures => fl!("directory-pictures"),
                Directory::Documents => fl!("directory-documents"),
                Directory::Downloads => fl!("directory-downloads"),
            })
            .collect();
        self.preview_delay_dropdown_options = ui::PREVIEW_DELAY_CHOICES
            .iter()
            .map(|secs| fl!("preview-delay-seconds", seconds = *secs))
            .collect();
        self.update_camera_options();
    }

    pub(crate) fn update_camera_options(&mut self) {
        self.camera_dropdown_options = self
            .available_cameras
            .iter()
            .map(|cam| cam.name.clone())
            .collect();
    }
}
