// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the screen state reducer

use shutter::ViewState;
use shutter::app::capture_error_message;
use shutter::backends::camera::CameraController;
use shutter::backends::camera::types::{CameraConfiguration, CameraDevice};
use shutter::errors::{AppError, CameraError, StorageError};
use std::path::{Path, PathBuf};

fn with_roll(paths: &[&str]) -> ViewState {
    paths.iter().fold(ViewState::default(), |state, path| {
        state.import_succeeded(PathBuf::from(path))
    })
}

#[test]
fn test_initial_state_is_empty() {
    let state = ViewState::default();
    assert!(!state.camera_permission);
    assert!(!state.storage_permission);
    assert!(state.camera.is_none());
    assert!(state.roll.is_empty());
    assert!(!state.is_previewing());
    assert!(!state.can_capture());
}

#[test]
fn test_capture_cycle() {
    let camera = CameraController::new(
        CameraDevice::default_camera(),
        CameraConfiguration::default(),
    );
    let state = ViewState::default()
        .with_camera_permission(true)
        .with_storage_permission(true)
        .with_camera(camera);
    assert!(state.can_capture());

    let state = state.capture_started();
    assert!(!state.can_capture(), "No second capture while one runs");

    let state = state.capture_succeeded(PathBuf::from("/cache/IMG_1.jpg"));
    assert!(state.can_capture());
    assert_eq!(state.roll, vec![PathBuf::from("/cache/IMG_1.jpg")]);
    assert_eq!(
        state.current_preview.as_deref(),
        Some(Path::new("/cache/IMG_1.jpg"))
    );
}

#[test]
fn test_failures_leave_roll_alone() {
    let before = with_roll(&["a.jpg", "b.jpg"]);

    let failures = [
        before.clone().capture_started().capture_failed("boom"),
        before.clone().import_failed("Failed to import image: nope"),
        before.clone().remove_failed("Failed to delete image: busy"),
        before.clone().export_failed("Failed to save image: full"),
    ];

    for after in failures {
        assert_eq!(after.roll, before.roll);
        assert!(after.error.is_some());
        assert!(!after.is_loading);
    }
}

#[test]
fn test_empty_error_gets_generic_text() {
    let state = ViewState::default().import_failed("   ");
    assert_eq!(state.error.as_deref(), Some("Unknown error"));
}

#[test]
fn test_remove_then_preview_is_ignored() {
    let state = with_roll(&["a.jpg", "b.jpg"]).removed(&PathBuf::from("a.jpg"));
    let state = state.dismiss_preview().preview(PathBuf::from("a.jpg"));
    assert!(!state.is_previewing());
}

#[test]
fn test_error_clears_once_shown() {
    let state = ViewState::default().import_failed("x").clear_error();
    assert_eq!(state.error, None);
}

#[test]
fn test_capture_error_prefixes() {
    let err: AppError = CameraError::Busy.into();
    assert!(capture_error_message(&err).starts_with("Image capture failed"));

    let err: AppError = StorageError::CacheUnavailable("gone".to_string()).into();
    assert!(capture_error_message(&err).starts_with("Failed to save image"));
}
