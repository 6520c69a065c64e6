// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use crate::errors::CameraError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, CameraError>;

/// Sender half of the viewfinder frame channel
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

/// Receiver half of the viewfinder frame channel
pub type FrameReceiver = futures::channel::mpsc::Receiver<CameraFrame>;

/// Which way the camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraLens {
    /// Facing the user (webcams, phone selfie cameras)
    Front,
    /// Facing away from the user
    #[default]
    Back,
}

impl CameraLens {
    pub const ALL: [CameraLens; 2] = [CameraLens::Back, CameraLens::Front];

    /// Parse a libcamera `api.libcamera.location` value
    pub fn from_location(location: &str) -> Option<Self> {
        match location.trim().to_ascii_lowercase().as_str() {
            "front" => Some(CameraLens::Front),
            "back" => Some(CameraLens::Back),
            _ => None,
        }
    }
}

/// Flash behaviour for still capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlashMode {
    #[default]
    Off,
    On,
    /// Fire only when the scene is dark
    Auto,
}

impl FlashMode {
    pub const ALL: [FlashMode; 3] = [FlashMode::Off, FlashMode::On, FlashMode::Auto];

    /// Cycle Off -> On -> Auto -> Off
    pub fn next(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Auto,
            FlashMode::Auto => FlashMode::Off,
        }
    }
}

/// Encoded output format for captured and stored images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

/// User directory that "Save" exports a previewed image into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Directory {
    #[default]
    Pictures,
    Documents,
    Downloads,
}

impl Directory {
    pub const ALL: [Directory; 3] = [Directory::Pictures, Directory::Documents, Directory::Downloads];

    /// Resolve to `<xdg dir>/shutter`, falling back to `$HOME/<name>/shutter`
    pub fn path(&self) -> PathBuf {
        let base = match self {
            Directory::Pictures => dirs::picture_dir(),
            Directory::Documents => dirs::document_dir(),
            Directory::Downloads => dirs::download_dir(),
        };
        base.unwrap_or_else(|| {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            match self {
                Directory::Pictures => home.join("Pictures"),
                Directory::Documents => home.join("Documents"),
                Directory::Downloads => home.join("Downloads"),
            }
        })
        .join(crate::constants::app_info::DIR_NAME)
    }
}

/// Everything the camera needs to know before a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CameraConfiguration {
    pub lens: CameraLens,
    pub flash: FlashMode,
    pub format: ImageFormat,
    pub directory: Directory,
}

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    /// PipeWire target (`pipewire-serial-N`), empty lets PipeWire pick
    pub path: String,
    /// Facing reported by libcamera, if any
    pub lens: Option<CameraLens>,
}

impl CameraDevice {
    /// Placeholder used when enumeration finds nothing specific
    pub fn default_camera() -> Self {
        Self {
            name: "Default Camera (PipeWire)".to_string(),
            path: String::new(),
            lens: None,
        }
    }
}

/// A single RGBA viewfinder frame
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Row stride in bytes (>= width * 4)
    pub stride: u32,
    pub data: Arc<[u8]>,
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Copy out tightly packed RGBA rows (drops stride padding)
    ///
    /// A truncated buffer yields fewer bytes than `width * height * 4`.
    pub fn packed_rgba(&self) -> Vec<u8> {
        let row_len = self.width as usize * 4;
        let stride = (self.stride as usize).max(row_len);
        if stride == 0 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(row_len * self.height as usize);
        for row in self.data.chunks(stride).take(self.height as usize) {
            out.extend_from_slice(&row[..row_len.min(row.len())]);
        }
        out
    }

    /// Packed RGBA covering the whole frame, `None` for a truncated buffer
    pub fn complete_rgba(&self) -> Option<Vec<u8>> {
        let packed = self.packed_rgba();
        let expected = self.width as usize * self.height as usize * 4;
        (packed.len() == expected).then_some(packed)
    }

    /// Mean Rec.601 luma in 0.0..=1.0, sampling every 8th pixel
    pub fn mean_luminance(&self) -> f32 {
        let stride = self.stride as usize;
        let mut sum = 0u64;
        let mut count = 0u64;
        for y in (0..self.height as usize).step_by(8) {
            let Some(row) = self.data.get(y * stride..) else {
                break;
            };
            for x in (0..self.width as usize).step_by(8) {
                let Some(px) = row.get(x * 4..x * 4 + 3) else {
                    break;
                };
                sum += (299 * px[0] as u64 + 587 * px[1] as u64 + 114 * px[2] as u64) / 1000;
                count += 1;
            }
        }
        if count == 0 {
            return 0.0;
        }
        (sum as f32 / count as f32) / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, stride: u32, value: u8) -> CameraFrame {
        CameraFrame {
            width,
            height,
            stride,
            data: Arc::from(vec![value; (stride * height) as usize]),
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_packed_rgba_strips_padding() {
        let frame = solid_frame(2, 3, 12, 7);
        let packed = frame.packed_rgba();
        assert_eq!(packed.len(), 2 * 3 * 4);
        assert!(packed.iter().all(|b| *b == 7));
    }

    #[test]
    fn test_truncated_frame_is_not_displayed() {
        let mut frame = solid_frame(4, 4, 16, 9);
        assert_eq!(frame.complete_rgba().map(|rgba| rgba.len()), Some(64));

        frame.data = Arc::from(vec![9u8; 16 * 3 + 5]);
        assert!(frame.packed_rgba().len() < 64);
        assert_eq!(frame.complete_rgba(), None);
    }

    #[test]
    fn test_mean_luminance_bounds() {
        assert_eq!(solid_frame(16, 16, 64, 0).mean_luminance(), 0.0);
        let white = solid_frame(16, 16, 64, 255).mean_luminance();
        assert!((white - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_lens_from_location() {
        assert_eq!(CameraLens::from_location("front"), Some(CameraLens::Front));
        assert_eq!(CameraLens::from_location(" Back "), Some(CameraLens::Back));
        assert_eq!(CameraLens::from_location("external"), None);
    }

    #[test]
    fn test_flash_cycle_returns_to_off() {
        assert_eq!(FlashMode::Off.next().next().next(), FlashMode::Off);
    }
}
