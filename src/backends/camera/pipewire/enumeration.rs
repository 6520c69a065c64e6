// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera enumeration
//!
//! PipeWire owns camera access, so discovery only has to find the video source
//! nodes and how to target them from `pipewiresrc`.

use super::super::types::{CameraDevice, CameraLens};
use tracing::{debug, info, warn};

/// Enumerate cameras using PipeWire
///
/// Falls back to a single "Default Camera" entry that lets PipeWire
/// auto-select when `pw-cli` is missing or reports nothing.
pub fn enumerate_pipewire_cameras() -> Option<Vec<CameraDevice>> {
    debug!("Attempting to enumerate cameras via PipeWire");

    if gstreamer::init().is_err() {
        warn!("GStreamer init failed");
        return None;
    }

    if gstreamer::ElementFactory::find("pipewiresrc").is_none() {
        debug!("pipewiresrc not available");
        return None;
    }

    if let Some(cameras) = try_enumerate_with_pw_cli() {
        debug!(count = cameras.len(), "Found PipeWire cameras");
        return Some(cameras);
    }

    info!("Using PipeWire auto-selection (default camera)");
    Some(vec![CameraDevice::default_camera()])
}

fn try_enumerate_with_pw_cli() -> Option<Vec<CameraDevice>> {
    let output = std::process::Command::new("pw-cli")
        .args(["ls", "Node"])
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("pw-cli command failed");
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut cameras = parse_pw_cli_nodes(&stdout);

    // `ls` omits libcamera properties; ask each node for its facing
    for (camera, node_id) in cameras.iter_mut() {
        if camera.lens.is_none() {
            camera.lens = query_node_location(node_id);
        }
    }

    let cameras: Vec<CameraDevice> = cameras.into_iter().map(|(camera, _)| camera).collect();
    if cameras.is_empty() {
        debug!("No cameras found via pw-cli");
        None
    } else {
        Some(cameras)
    }
}

#[derive(Default)]
struct NodeBuilder {
    id: Option<String>,
    serial: Option<String>,
    name: Option<String>,
    location: Option<String>,
    is_video_source: bool,
}

impl NodeBuilder {
    fn finish(self) -> Option<(CameraDevice, String)> {
        if !self.is_video_source {
            return None;
        }
        let id = self.id?;
        let name = self.name?;

        // Prefer object.serial for target-object; node ids get reused
        let path = match &self.serial {
            Some(serial) => format!("pipewire-serial-{}", serial),
            None => format!("pipewire-{}", id),
        };
        let lens = self.location.as_deref().and_then(CameraLens::from_location);

        debug!(id = %id, name = %name, path = %path, ?lens, "Found video camera");
        Some((CameraDevice { name, path, lens }, id))
    }
}

/// Parse `pw-cli ls Node` output into cameras paired with their node id
pub fn parse_pw_cli_nodes(output: &str) -> Vec<(CameraDevice, String)> {
    let mut cameras = Vec::new();
    let mut current = NodeBuilder::default();

    for line in output.lines() {
        let trimmed = line.trim();

        // "id 76, type PipeWire:Interface:Node/3"
        if trimmed.starts_with("id ") && trimmed.contains("type PipeWire:Interface:Node") {
            cameras.extend(std::mem::take(&mut current).finish());
            current.id = trimmed
                .strip_prefix("id ")
                .and_then(|rest| rest.split(',').next())
                .map(|id| id.trim().to_string());
            continue;
        }

        if trimmed.contains("media.class") && trimmed.contains("\"Video/Source\"") {
            current.is_video_source = true;
        } else if trimmed.contains("object.serial") {
            current.serial = extract_quoted_value(trimmed);
        } else if trimmed.contains("node.description") {
            current.name = extract_quoted_value(trimmed);
        } else if trimmed.contains("api.libcamera.location") {
            current.location = extract_quoted_value(trimmed);
        }
    }
    cameras.extend(current.finish());

    cameras
}

/// Extract quoted value from a property line (e.g., 'property = "value"' -> "value")
fn extract_quoted_value(line: &str) -> Option<String> {
    let start = line.find('"')?;
    let end = line[start + 1..].find('"')?;
    Some(line[start + 1..start + 1 + end].to_string())
}

fn query_node_location(node_id: &str) -> Option<CameraLens> {
    let output = std::process::Command::new("pw-cli")
        .args(["info", node_id])
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.contains("api.libcamera.location"))
        .find_map(extract_quoted_value)
        .and_then(|value| CameraLens::from_location(&value))
}

/// Translate a device path into the `pipewiresrc` targeting property
pub fn pipewire_target(device_path: &str) -> String {
    if device_path.is_empty() {
        String::new()
    } else if let Some(serial) = device_path.strip_prefix("pipewire-serial-") {
        format!("target-object={} ", serial)
    } else if let Some(node_id) = device_path.strip_prefix("pipewire-") {
        format!("target-object={} ", node_id)
    } else if device_path.starts_with("/dev/video") {
        format!("path=v4l2:{} ", device_path)
    } else {
        format!("path={} ", device_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PW_CLI_LS: &str = r#"
	id 31, type PipeWire:Interface:Node/3
 		object.serial = "31"
 		factory.id = "10"
 		node.description = "Dummy-Driver"
 		media.class = "Audio/Sink"
	id 58, type PipeWire:Interface:Node/3
 		object.serial = "2146"
 		node.description = "Integrated Camera (V4L2)"
 		media.class = "Video/Source"
	id 61, type PipeWire:Interface:Node/3
 		node.description = "imx258"
 		api.libcamera.location = "back"
 		media.class = "Video/Source"
"#;

    #[test]
    fn test_parse_only_video_sources() {
        let cameras = parse_pw_cli_nodes(PW_CLI_LS);
        assert_eq!(cameras.len(), 2);

        let (first, first_id) = &cameras[0];
        assert_eq!(first.name, "Integrated Camera (V4L2)");
        assert_eq!(first.path, "pipewire-serial-2146");
        assert_eq!(first.lens, None);
        assert_eq!(first_id, "58");

        let (second, _) = &cameras[1];
        assert_eq!(second.path, "pipewire-61");
        assert_eq!(second.lens, Some(CameraLens::Back));
    }

    #[test]
    fn test_pipewire_target() {
        assert_eq!(pipewire_target(""), "");
        assert_eq!(pipewire_target("pipewire-serial-9"), "target-object=9 ");
        assert_eq!(pipewire_target("pipewire-42"), "target-object=42 ");
        assert_eq!(pipewire_target("/dev/video0"), "path=v4l2:/dev/video0 ");
    }
}
