// SPDX-License-Identifier: GPL-3.0-only

//! Camera and storage permissions
//!
//! Inside a Flatpak sandbox camera access goes through the XDG Camera portal.
//! A native install talks to PipeWire directly and needs no grant. Storage
//! only means the capture cache can be created and written.

use crate::constants::app_info;
use crate::errors::PermissionError;
use crate::storage::FileManager;
use futures::StreamExt;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use zbus::zvariant::{OwnedValue, Value};

const PORTAL_DESTINATION: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const CAMERA_INTERFACE: &str = "org.freedesktop.portal.Camera";
const REQUEST_INTERFACE: &str = "org.freedesktop.portal.Request";

/// Portal response code for a granted request
const RESPONSE_SUCCESS: u32 = 0;

/// Queries and requests the capabilities the screen needs
#[derive(Debug, Clone)]
pub struct PermissionManager {
    files: FileManager,
    sandboxed: bool,
}

impl PermissionManager {
    pub fn new(files: FileManager) -> Self {
        Self {
            files,
            sandboxed: app_info::is_flatpak(),
        }
    }

    /// Treat the process as sandboxed (or not) regardless of the environment
    pub fn with_sandbox(mut self, sandboxed: bool) -> Self {
        self.sandboxed = sandboxed;
        self
    }

    /// Native installs always have access; a sandbox has to ask first
    pub async fn has_camera_permission(&self) -> bool {
        !self.sandboxed
    }

    /// Ask the portal for access; `false` on denial or portal failure
    ///
    /// The portal remembers earlier answers, so a repeated request returns
    /// without showing a dialog.
    pub async fn request_camera_permission(&self) -> bool {
        if !self.sandboxed {
            debug!("Not sandboxed, camera access granted");
            return true;
        }

        match camera_present().await {
            Ok(false) => {
                warn!("Camera portal reports no camera");
                return false;
            }
            Ok(true) => {}
            Err(e) => {
                warn!(error = %e, "Camera portal unavailable");
                return false;
            }
        }

        match access_camera().await {
            Ok(()) => {
                info!("Camera access granted by portal");
                true
            }
            Err(e) => {
                warn!(error = %e, "Camera access not granted");
                false
            }
        }
    }

    pub async fn has_storage_permission(&self) -> bool {
        self.files.cache_dir().is_dir() && self.files.is_writable().await
    }

    /// Create the capture cache if needed and check it is writable
    pub async fn request_storage_permission(&self) -> bool {
        let writable = self.files.is_writable().await;
        if !writable {
            warn!(dir = %self.files.cache_dir().display(), "Capture cache is not writable");
        }
        writable
    }
}

async fn camera_portal(
    connection: &zbus::Connection,
) -> Result<zbus::Proxy<'static>, PermissionError> {
    Ok(zbus::Proxy::new(connection, PORTAL_DESTINATION, PORTAL_PATH, CAMERA_INTERFACE).await?)
}

async fn camera_present() -> Result<bool, PermissionError> {
    let connection = zbus::Connection::session().await?;
    let proxy = camera_portal(&connection).await?;
    Ok(proxy.get_property("IsCameraPresent").await?)
}

/// Call `AccessCamera` and wait for the request's `Response` signal
async fn access_camera() -> Result<(), PermissionError> {
    let connection = zbus::Connection::session().await?;
    let proxy = camera_portal(&connection).await?;

    let token = format!("shutter_{}", uuid::Uuid::new_v4().simple());
    let sender = connection
        .unique_name()
        .map(|name| name.as_str().trim_start_matches(':').replace('.', "_"))
        .ok_or_else(|| PermissionError::PortalUnavailable("no unique bus name".to_string()))?;
    let request_path = format!("{}/request/{}/{}", PORTAL_PATH, sender, token);

    // Subscribe before calling so a fast reply is not missed
    let request = zbus::Proxy::new(
        &connection,
        PORTAL_DESTINATION,
        request_path.clone(),
        REQUEST_INTERFACE,
    )
    .await?;
    let mut responses = request.receive_signal("Response").await?;

    let mut options: HashMap<&str, Value<'_>> = HashMap::new();
    options.insert("handle_token", Value::from(token.as_str()));
    let handle: zbus::zvariant::OwnedObjectPath = proxy.call("AccessCamera", &(options,)).await?;
    debug!(handle = %handle.as_str(), expected = %request_path, "Camera access requested");

    let message = responses
        .next()
        .await
        .ok_or_else(|| PermissionError::PortalUnavailable("request closed".to_string()))?;
    let (response, _results): (u32, HashMap<String, OwnedValue>) =
        message.body().deserialize()?;

    if response == RESPONSE_SUCCESS {
        Ok(())
    } else {
        Err(PermissionError::Denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_native_camera_access_needs_no_grant() {
        let dir = tempfile::tempdir().unwrap();
        let permissions = PermissionManager::new(FileManager::new(dir.path())).with_sandbox(false);
        assert!(permissions.has_camera_permission().await);
        assert!(permissions.request_camera_permission().await);
    }

    #[tokio::test]
    async fn test_storage_request_creates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("nested").join("captures");
        let permissions = PermissionManager::new(FileManager::new(&cache));

        assert!(!permissions.has_storage_permission().await);
        assert!(permissions.request_storage_permission().await);
        assert!(permissions.has_storage_permission().await);
        assert!(cache.is_dir());
    }
}
