// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use shutter::Config;
use shutter::backends::camera::types::{CameraLens, Directory, FlashMode, ImageFormat};
use std::time::Duration;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.lens, CameraLens::Back, "Back lens by default");
    assert_eq!(config.flash, FlashMode::Off, "Flash off by default");
    assert_eq!(config.image_format, ImageFormat::Jpeg);
    assert_eq!(config.export_directory, Directory::Pictures);
    assert_eq!(config.last_camera_path, None);
}

#[test]
fn test_camera_configuration_mirrors_preferences() {
    let config = Config {
        lens: CameraLens::Front,
        flash: FlashMode::Auto,
        image_format: ImageFormat::Png,
        export_directory: Directory::Downloads,
        ..Config::default()
    };

    let camera = config.camera_configuration();
    assert_eq!(camera.lens, CameraLens::Front);
    assert_eq!(camera.flash, FlashMode::Auto);
    assert_eq!(camera.format, ImageFormat::Png);
    assert_eq!(camera.directory, Directory::Downloads);
}

#[test]
fn test_preview_delay_has_floor() {
    let config = Config {
        preview_dismiss_secs: 0,
        ..Config::default()
    };
    assert_eq!(config.preview_delay(), Duration::from_secs(1));

    let config = Config {
        preview_dismiss_secs: 5,
        ..Config::default()
    };
    assert_eq!(config.preview_delay(), Duration::from_secs(5));
}

#[test]
fn test_export_directory_is_app_subfolder() {
    for directory in Directory::ALL {
        let path = directory.path();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("shutter"),
            "{:?} should resolve to a shutter subfolder",
            directory
        );
    }
}
