// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::camera::types::{
    CameraConfiguration, CameraLens, Directory, FlashMode, ImageFormat,
};
use crate::constants::timing;
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::{Theme, theme};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application theme preference
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AppTheme {
    /// Follow system theme (dark or light based on system setting)
    #[default]
    System,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl AppTheme {
    pub const ALL: [AppTheme; 3] = [AppTheme::System, AppTheme::Dark, AppTheme::Light];

    /// Get the COSMIC theme for this app theme preference
    pub fn theme(&self) -> Theme {
        match self {
            Self::Dark => {
                let mut theme = theme::system_dark();
                theme.theme_type.prefer_dark(Some(true));
                theme
            }
            Self::Light => {
                let mut theme = theme::system_light();
                theme.theme_type.prefer_dark(Some(false));
                theme
            }
            Self::System => theme::system_preference(),
        }
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Application theme preference (System, Dark, Light)
    pub app_theme: AppTheme,
    /// Preferred camera facing
    pub lens: CameraLens,
    /// Flash mode for still capture
    pub flash: FlashMode,
    /// Encoding of captured images
    pub image_format: ImageFormat,
    /// Where "Save" copies a previewed image
    pub export_directory: Directory,
    /// Seconds before the preview closes on its own
    pub preview_dismiss_secs: u64,
    /// Last used camera device path
    pub last_camera_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            lens: CameraLens::Back,
            flash: FlashMode::Off,
            image_format: ImageFormat::Jpeg,
            export_directory: Directory::Pictures,
            preview_dismiss_secs: timing::PREVIEW_AUTO_DISMISS_SECS,
            last_camera_path: None,
        }
    }
}

impl Config {
    /// Capture settings derived from the persisted preferences
    pub fn camera_configuration(&self) -> CameraConfiguration {
        CameraConfiguration {
            lens: self.lens,
            flash: self.flash,
            format: self.image_format,
            directory: self.export_directory,
        }
    }

    /// Auto-dismiss delay, never shorter than one second
    pub fn preview_delay(&self) -> Duration {
        Duration::from_secs(self.preview_dismiss_secs.max(1))
    }
}
