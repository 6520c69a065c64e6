// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │ frames             take_picture()
//!            ▼                          │
//! ┌─────────────────────┐    ┌──────────┴──────────┐
//! │  CameraBackend Trait│    │  CameraController   │
//! └──────────┬──────────┘    └─────────────────────┘
//!            │
//!            ▼
//!       ┌────────┐
//!       │PipeWire│  ← Concrete implementation
//!       └────────┘
//! ```

pub mod controller;
pub mod pipewire;
pub mod types;

pub use controller::{CameraController, CapturedImage, select_device, should_fire_flash};
pub use types::*;

/// A running viewfinder stream
///
/// Dropping it stops the stream and releases the device.
pub trait PreviewStream: Send {
    fn device(&self) -> &CameraDevice;
}

/// Camera backend trait
pub trait CameraBackend: Send + Sync {
    /// Enumerate available cameras on this backend
    fn enumerate_cameras(&self) -> Vec<CameraDevice>;

    /// Whether the backend can be used on this system
    fn is_available(&self) -> bool;

    /// Start streaming RGBA frames from `device` into `frame_sender`
    fn start_preview(
        &self,
        device: &CameraDevice,
        frame_sender: FrameSender,
    ) -> BackendResult<Box<dyn PreviewStream>>;
}

/// Get a concrete backend instance (PipeWire only)
pub fn get_backend() -> Box<dyn CameraBackend> {
    Box::new(pipewire::PipeWireBackend::new())
}
