// SPDX-License-Identifier: GPL-3.0-only

//! Camera controller
//!
//! The handle the screen keeps while a camera is open. The viewfinder
//! subscription publishes every frame into a shared slot; taking a picture
//! encodes whatever frame is newest at that moment.

use super::types::*;
use crate::constants::timing;
use crate::errors::CameraError;
use crate::pipelines::photo::PhotoEncoder;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Encoded still image handed back by [`CameraController::take_picture`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// Shared handle to an open camera
///
/// Cloning is cheap; clones share the latest-frame slot and the busy flag.
#[derive(Clone)]
pub struct CameraController {
    device: CameraDevice,
    configuration: CameraConfiguration,
    latest_frame: Arc<Mutex<Option<CameraFrame>>>,
    capturing: Arc<AtomicBool>,
}

impl CameraController {
    pub fn new(device: CameraDevice, configuration: CameraConfiguration) -> Self {
        info!(device = %device.name, ?configuration, "Camera controller created");
        Self {
            device,
            configuration,
            latest_frame: Arc::new(Mutex::new(None)),
            capturing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn device(&self) -> &CameraDevice {
        &self.device
    }

    pub fn configuration(&self) -> CameraConfiguration {
        self.configuration
    }

    /// Same camera and frame slot, different capture settings
    pub fn with_configuration(&self, configuration: CameraConfiguration) -> Self {
        Self {
            configuration,
            ..self.clone()
        }
    }

    /// Store a viewfinder frame as the capture candidate
    pub fn publish_frame(&self, frame: CameraFrame) {
        if let Ok(mut guard) = self.latest_frame.lock() {
            *guard = Some(frame);
        }
    }

    pub fn latest_frame(&self) -> Option<CameraFrame> {
        self.latest_frame.lock().ok()?.clone()
    }

    pub fn has_frame(&self) -> bool {
        self.latest_frame
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::Acquire)
    }

    /// Whether the screen flash should fire for the next capture
    pub fn should_fire_flash(&self) -> bool {
        should_fire_flash(self.configuration.flash, self.latest_frame().as_ref())
    }

    /// Encode the newest frame in the configured format
    ///
    /// Fails with [`CameraError::NoFrameAvailable`] before the first frame and
    /// with [`CameraError::Busy`] while another capture is encoding.
    pub async fn take_picture(&self) -> Result<CapturedImage, CameraError> {
        if self
            .capturing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Capture requested while another capture is running");
            return Err(CameraError::Busy);
        }
        let _guard = CaptureGuard(&self.capturing);

        let frame = self.latest_frame().ok_or(CameraError::NoFrameAvailable)?;
        debug!(
            width = frame.width,
            height = frame.height,
            age_ms = frame.captured_at.elapsed().as_millis(),
            "Capturing frame"
        );

        let encoded = PhotoEncoder::new(self.configuration.format)
            .encode(frame)
            .await?;

        info!(
            size = encoded.data.len(),
            format = ?encoded.format,
            "Picture taken"
        );

        Ok(CapturedImage {
            bytes: encoded.data,
            format: encoded.format,
            width: encoded.width,
            height: encoded.height,
        })
    }
}

/// Clears the busy flag however the capture ends
struct CaptureGuard<'a>(&'a AtomicBool);

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl fmt::Debug for CameraController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraController")
            .field("device", &self.device)
            .field("configuration", &self.configuration)
            .field("has_frame", &self.has_frame())
            .finish()
    }
}

/// Two handles are equal when they share the same frame slot
impl PartialEq for CameraController {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.latest_frame, &other.latest_frame)
            && self.configuration == other.configuration
    }
}

/// Pick the camera facing `lens`, else the first one
pub fn select_device(devices: &[CameraDevice], lens: CameraLens) -> Option<&CameraDevice> {
    devices
        .iter()
        .find(|device| device.lens == Some(lens))
        .or_else(|| devices.first())
}

/// Flash decision for a mode and the current scene
///
/// `Auto` fires when the frame is darker than
/// [`timing::AUTO_FLASH_LUMA_THRESHOLD`]; with no frame it stays off.
pub fn should_fire_flash(mode: FlashMode, frame: Option<&CameraFrame>) -> bool {
    match mode {
        FlashMode::Off => false,
        FlashMode::On => true,
        FlashMode::Auto => frame
            .map(|frame| frame.mean_luminance() < timing::AUTO_FLASH_LUMA_THRESHOLD)
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn device(name: &str, lens: Option<CameraLens>) -> CameraDevice {
        CameraDevice {
            name: name.to_string(),
            path: format!("pipewire-{}", name),
            lens,
        }
    }

    fn frame(value: u8) -> CameraFrame {
        CameraFrame {
            width: 16,
            height: 16,
            stride: 64,
            data: Arc::from(vec![value; 64 * 16]),
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_select_device_prefers_lens() {
        let devices = vec![
            device("usb", None),
            device("selfie", Some(CameraLens::Front)),
            device("main", Some(CameraLens::Back)),
        ];
        assert_eq!(
            select_device(&devices, CameraLens::Back).map(|d| d.name.as_str()),
            Some("main")
        );
        assert_eq!(
            select_device(&devices, CameraLens::Front).map(|d| d.name.as_str()),
            Some("selfie")
        );
    }

    #[test]
    fn test_select_device_falls_back_to_first() {
        let devices = vec![device("usb", None)];
        assert_eq!(
            select_device(&devices, CameraLens::Front).map(|d| d.name.as_str()),
            Some("usb")
        );
        assert!(select_device(&[], CameraLens::Back).is_none());
    }

    #[test]
    fn test_auto_flash_follows_scene_brightness() {
        assert!(should_fire_flash(FlashMode::Auto, Some(&frame(10))));
        assert!(!should_fire_flash(FlashMode::Auto, Some(&frame(200))));
        assert!(!should_fire_flash(FlashMode::Auto, None));
        assert!(should_fire_flash(FlashMode::On, None));
        assert!(!should_fire_flash(FlashMode::Off, Some(&frame(0))));
    }

    #[tokio::test]
    async fn test_take_picture_without_frame() {
        let controller = CameraController::new(device("usb", None), CameraConfiguration::default());
        assert_eq!(
            controller.take_picture().await,
            Err(CameraError::NoFrameAvailable)
        );
        assert!(!controller.is_capturing());
    }

    #[tokio::test]
    async fn test_take_picture_encodes_latest_frame() {
        let controller = CameraController::new(device("usb", None), CameraConfiguration::default());
        let viewfinder = controller.clone();
        viewfinder.publish_frame(frame(90));

        let image = controller.take_picture().await.unwrap();
        assert_eq!(image.format, ImageFormat::Jpeg);
        assert_eq!((image.width, image.height), (16, 16));
        assert!(!image.bytes.is_empty());
    }

    #[test]
    fn test_reconfigured_handle_shares_frames() {
        let controller = CameraController::new(device("usb", None), CameraConfiguration::default());
        let png = controller.with_configuration(CameraConfiguration {
            format: ImageFormat::Png,
            ..CameraConfiguration::default()
        });
        png.publish_frame(frame(1));
        assert!(controller.has_frame());
        assert_ne!(controller, png);
        assert_eq!(controller, controller.clone());
    }
}
