// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! This module provides command-line functionality for:
//! - Listing available cameras
//! - Taking a photo without opening the window

use futures::channel::mpsc;
use shutter::backends::camera::types::{
    CameraConfiguration, CameraFrame, Directory, FrameReceiver, ImageFormat,
};
use shutter::backends::camera::{CameraController, get_backend};
use shutter::constants::pipeline;
use shutter::storage::FileManager;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How long to wait for the first usable frame
const CAPTURE_TIMEOUT: Duration = Duration::from_secs(5);

/// Frames before this are skipped while exposure settles
const WARMUP: Duration = Duration::from_millis(500);

/// List all available cameras
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let backend = get_backend();
    if !backend.is_available() {
        return Err("PipeWire camera support (pipewiresrc) is not installed".into());
    }

    let cameras = backend.enumerate_cameras();
    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        let lens = camera
            .lens
            .map(|lens| format!(" ({:?})", lens))
            .unwrap_or_default();
        println!("  [{}] {}{}", index, camera.name, lens);
    }

    Ok(())
}

/// Take a single photo
///
/// Without `output` the photo goes to `<Pictures>/shutter` under a
/// timestamped name. The format follows the output extension, JPEG otherwise.
pub fn take_photo(
    camera_index: usize,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let backend = get_backend();
    let cameras = backend.enumerate_cameras();
    if cameras.is_empty() {
        return Err("No cameras found".into());
    }
    let Some(camera) = cameras.get(camera_index) else {
        return Err(format!(
            "Camera index {} out of range (0-{})",
            camera_index,
            cameras.len() - 1
        )
        .into());
    };
    println!("Using camera: {}", camera.name);

    let format = output
        .as_deref()
        .and_then(format_for_path)
        .unwrap_or(ImageFormat::Jpeg);

    println!("Capturing...");
    let (sender, mut receiver): (_, FrameReceiver) =
        mpsc::channel(pipeline::FRAME_CHANNEL_CAPACITY);
    let stream = backend.start_preview(camera, sender)?;
    let frame = wait_for_frame(&mut receiver).ok_or("Failed to capture frame from camera")?;
    drop(stream);

    let controller = CameraController::new(
        camera.clone(),
        CameraConfiguration {
            format,
            ..CameraConfiguration::default()
        },
    );
    controller.publish_frame(frame);

    let rt = tokio::runtime::Runtime::new()?;
    let image = rt.block_on(controller.take_picture())?;

    let path = match output {
        Some(path) if !path.is_dir() => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &image.bytes)?;
            path
        }
        other => {
            let dir = other.unwrap_or_else(|| Directory::Pictures.path());
            let files = FileManager::new(dir);
            rt.block_on(async {
                tokio::fs::create_dir_all(files.cache_dir()).await?;
                files
                    .create_image_file(&image.bytes, image.format)
                    .await
                    .map_err(|e| std::io::Error::other(e.to_string()))
            })?
        }
    };

    println!(
        "Photo saved: {} ({}x{})",
        path.display(),
        image.width,
        image.height
    );
    Ok(())
}

/// Keep the newest frame, returning the first one after warm-up
fn wait_for_frame(receiver: &mut FrameReceiver) -> Option<CameraFrame> {
    let start = Instant::now();
    let mut frame = None;

    while start.elapsed() < CAPTURE_TIMEOUT {
        match receiver.try_recv() {
            Ok(f) => {
                frame = Some(f);
                if start.elapsed() > WARMUP {
                    break;
                }
            }
            Err(_) => std::thread::sleep(Duration::from_millis(16)),
        }
    }

    frame
}

fn format_for_path(path: &Path) -> Option<ImageFormat> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    ImageFormat::ALL
        .into_iter()
        .find(|format| format.extension() == ext || (ext == "jpeg" && *format == ImageFormat::Jpeg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_follows_extension() {
        assert_eq!(format_for_path(Path::new("a.PNG")), Some(ImageFormat::Png));
        assert_eq!(format_for_path(Path::new("a.jpeg")), Some(ImageFormat::Jpeg));
        assert_eq!(format_for_path(Path::new("a.tiff")), None);
        assert_eq!(format_for_path(Path::new("noext")), None);
    }
}
