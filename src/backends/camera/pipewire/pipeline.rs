// SPDX-License-Identifier: MPL-2.0

//! PipeWire GStreamer pipeline for the viewfinder

use super::super::PreviewStream;
use super::super::types::*;
use super::enumeration::pipewire_target;
use crate::constants::{pipeline, timing};
use crate::errors::CameraError;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// PipeWire camera pipeline
///
/// `pipewiresrc` converted to RGBA and scaled down for display. Frames are
/// pushed into a bounded channel; when the UI lags, frames are dropped.
pub struct PipeWirePipeline {
    device: CameraDevice,
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
}

/// Build the launch string for a device
pub fn build_pipeline_string(device: &CameraDevice) -> String {
    format!(
        "pipewiresrc {}do-timestamp=true ! \
         queue max-size-buffers=2 leaky=downstream ! \
         videoconvert ! videoscale ! \
         video/x-raw,format=RGBA,width=[1,{}],height=[1,{}],pixel-aspect-ratio=1/1 ! \
         appsink name=sink",
        pipewire_target(&device.path),
        pipeline::MAX_PREVIEW_WIDTH,
        pipeline::MAX_PREVIEW_HEIGHT,
    )
}

impl PipeWirePipeline {
    /// Create and start a pipeline streaming into `frame_sender`
    pub fn new(device: &CameraDevice, mut frame_sender: FrameSender) -> BackendResult<Self> {
        info!(device = %device.name, path = %device.path, "Creating PipeWire pipeline");

        gstreamer::init().map_err(|e| CameraError::InitializationFailed(e.to_string()))?;

        gstreamer::ElementFactory::find("pipewiresrc").ok_or_else(|| {
            CameraError::InitializationFailed("pipewiresrc not available".to_string())
        })?;

        let description = build_pipeline_string(device);
        info!(pipeline = %description, "Launching pipeline");

        let pipeline = gstreamer::parse::launch(&description)
            .map_err(|e| CameraError::InitializationFailed(e.to_string()))?
            .dynamic_cast::<gstreamer::Pipeline>()
            .map_err(|_| {
                CameraError::InitializationFailed("Launch result is not a pipeline".to_string())
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| CameraError::InitializationFailed("Failed to get appsink".to_string()))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| CameraError::InitializationFailed("Failed to cast appsink".to_string()))?;

        appsink.set_property("emit-signals", true);
        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_start = Instant::now();
                    let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

                    let sample = appsink.pull_sample().map_err(|e| {
                        if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                            error!(frame = frame_num, error = ?e, "Failed to pull sample");
                        }
                        gstreamer::FlowError::Eos
                    })?;

                    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
                    if buffer.flags().contains(gstreamer::BufferFlags::CORRUPTED) {
                        // Skip the frame, keep the stream running
                        return Ok(gstreamer::FlowSuccess::Ok);
                    }

                    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                    let video_info =
                        VideoInfo::from_caps(caps).map_err(|_| gstreamer::FlowError::Error)?;
                    let map = buffer
                        .map_readable()
                        .map_err(|_| gstreamer::FlowError::Error)?;

                    let frame = CameraFrame {
                        width: video_info.width(),
                        height: video_info.height(),
                        stride: video_info.stride()[0] as u32,
                        data: Arc::from(map.as_slice()),
                        captured_at: frame_start,
                    };

                    match frame_sender.try_send(frame) {
                        Ok(()) => {
                            if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                                debug!(
                                    frame = frame_num,
                                    width = video_info.width(),
                                    height = video_info.height(),
                                    total_us = frame_start.elapsed().as_micros(),
                                    "Frame delivered"
                                );
                            }
                        }
                        Err(e) if e.is_disconnected() => {
                            return Err(gstreamer::FlowError::Eos);
                        }
                        Err(_) => {
                            if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                                debug!(frame = frame_num, "Frame dropped (channel full)");
                            }
                        }
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline.set_state(gstreamer::State::Playing).map_err(|e| {
            CameraError::InitializationFailed(format!("Failed to start pipeline: {}", e))
        })?;

        let (result, state, pending) = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::START_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, pending = ?pending, "Pipeline state");
        if state != gstreamer::State::Playing {
            warn!("Pipeline is not in PLAYING state yet");
        }

        Ok(Self {
            device: device.clone(),
            pipeline,
            appsink,
        })
    }
}

impl PreviewStream for PipeWirePipeline {
    fn device(&self) -> &CameraDevice {
        &self.device
    }
}

impl Drop for PipeWirePipeline {
    fn drop(&mut self) {
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        // Release the device right away so a restarted viewfinder can open it
        let _ = self.pipeline.set_state(gstreamer::State::Null);
        info!("PipeWire pipeline stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_string_targets_device() {
        let device = CameraDevice {
            name: "Integrated Camera".to_string(),
            path: "pipewire-serial-12".to_string(),
            lens: None,
        };
        let launch = build_pipeline_string(&device);
        assert!(launch.starts_with("pipewiresrc target-object=12 "));
        assert!(launch.contains("format=RGBA"));
        assert!(launch.ends_with("appsink name=sink"));
    }
}
