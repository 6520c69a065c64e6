// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// UI layout constants
pub mod ui {
    /// Shutter button outer diameter
    pub const CAPTURE_BUTTON_OUTER: f32 = 64.0;

    /// Shutter button inner circle diameter
    pub const CAPTURE_BUTTON_INNER: f32 = 52.0;

    /// Square side of a roll thumbnail tile
    pub const ROLL_TILE_SIZE: f32 = 72.0;

    /// Spacing between roll tiles
    pub const ROLL_SPACING: u16 = 8;

    /// Height reserved for the roll strip (tile plus scrollbar)
    pub const ROLL_HEIGHT: f32 = 92.0;

    /// Corner radius for thumbnails and overlay buttons
    pub const CORNER_RADIUS: f32 = 8.0;

    /// Width of the icon buttons flanking the shutter
    pub const ICON_BUTTON_WIDTH: f32 = 44.0;

    /// Background alpha for overlays drawn over the viewfinder
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.6;

    /// Preview delay choices shown in settings (seconds)
    pub const PREVIEW_DELAY_CHOICES: [u64; 4] = [2, 3, 5, 10];
}

/// GStreamer viewfinder constants
pub mod pipeline {
    /// Maximum buffers held by the appsink before dropping
    pub const MAX_BUFFERS: u32 = 2;

    /// Viewfinder frames are scaled down to fit this box
    pub const MAX_PREVIEW_WIDTH: u32 = 1920;
    pub const MAX_PREVIEW_HEIGHT: u32 = 1080;

    /// Capacity of the frame channel between GStreamer and the UI
    pub const FRAME_CHANNEL_CAPACITY: usize = 4;

    /// JPEG quality (0-100) for captured photos
    pub const JPEG_QUALITY: u8 = 92;
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// Log every Nth frame in the appsink callback
    pub const FRAME_LOG_INTERVAL: u64 = 30;

    /// Time to wait for the pipeline to reach PLAYING
    pub const START_TIMEOUT_SECS: u64 = 5;

    /// Default delay before a preview closes on its own
    pub const PREVIEW_AUTO_DISMISS_SECS: u64 = 3;

    /// How long the screen flash stays up before the frame is grabbed
    pub const FLASH_DURATION: Duration = Duration::from_millis(350);

    /// Mean luma below which `FlashMode::Auto` fires
    pub const AUTO_FLASH_LUMA_THRESHOLD: f32 = 0.25;
}

/// File naming and storage constants
pub mod storage {
    /// Prefix for captured images
    pub const IMAGE_PREFIX: &str = "IMG_";

    /// Timestamp layout used in capture file names
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

    /// Subdirectory of the app cache holding captures and imports
    pub const CAPTURES_DIR: &str = "captures";

    /// Longest edge of the decoded roll thumbnails
    pub const THUMBNAIL_SIZE: u32 = 256;

    /// Marker file written to check the cache is writable
    pub const WRITE_MARKER: &str = ".write-test";
}

/// Recognized image files
pub mod file_formats {
    /// Supported image file extensions for import
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

    /// Check if extension is an image format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}

/// Application information utilities
pub mod app_info {
    use std::path::Path;

    /// Reverse-DNS application id (config, cache and desktop file)
    pub const APP_ID: &str = "io.github.shutter.Shutter";

    /// Directory name used under user folders
    pub const DIR_NAME: &str = "shutter";

    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Check if the application is running inside a Flatpak sandbox
    pub fn is_flatpak() -> bool {
        Path::new("/.flatpak-info").exists()
    }

    /// Get the runtime environment string (e.g., "Flatpak" or "Native")
    pub fn runtime_environment() -> &'static str {
        if is_flatpak() { "Flatpak" } else { "Native" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_case_insensitive() {
        assert!(file_formats::is_image_extension("JPG"));
        assert!(file_formats::is_image_extension("webp"));
        assert!(!file_formats::is_image_extension("mp4"));
    }

    #[test]
    fn test_default_delay_is_offered() {
        assert!(ui::PREVIEW_DELAY_CHOICES.contains(&timing::PREVIEW_AUTO_DISMISS_SECS));
    }
}
