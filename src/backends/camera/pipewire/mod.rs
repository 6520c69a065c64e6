// SPDX-License-Identifier: MPL-2.0

//! PipeWire camera backend
//!
//! Cameras are discovered through `pw-cli` and streamed with `pipewiresrc`,
//! which also goes through the camera portal inside a sandbox.

mod enumeration;
mod pipeline;

pub use enumeration::{enumerate_pipewire_cameras, parse_pw_cli_nodes, pipewire_target};
pub use pipeline::{PipeWirePipeline, build_pipeline_string};

use super::types::*;
use super::{CameraBackend, PreviewStream};
use tracing::{info, warn};

/// PipeWire backend implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct PipeWireBackend;

impl PipeWireBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CameraBackend for PipeWireBackend {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        match enumerate_pipewire_cameras() {
            Some(cameras) => {
                info!(count = cameras.len(), "PipeWire cameras enumerated");
                cameras
            }
            None => {
                warn!("PipeWire enumeration unavailable");
                Vec::new()
            }
        }
    }

    fn is_available(&self) -> bool {
        gstreamer::init().is_ok() && gstreamer::ElementFactory::find("pipewiresrc").is_some()
    }

    fn start_preview(
        &self,
        device: &CameraDevice,
        frame_sender: FrameSender,
    ) -> BackendResult<Box<dyn PreviewStream>> {
        let pipeline = PipeWirePipeline::new(device, frame_sender)?;
        Ok(Box::new(pipeline))
    }
}
