// SPDX-License-Identifier: GPL-3.0-only

//! Permission handlers
//!
//! Both permissions are requested at startup and again whenever the user
//! presses a button that needs one that is still missing.

use crate::app::state::{AppModel, Message};
use crate::fl;
use crate::permissions::PermissionManager;
use cosmic::Task;
use tracing::{info, warn};

impl AppModel {
    pub(crate) fn permission_manager(&self) -> PermissionManager {
        PermissionManager::new(self.files.clone())
    }

    pub(crate) fn request_camera_permission_task(
        &self,
        permissions: PermissionManager,
    ) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                if permissions.has_camera_permission().await {
                    return true;
                }
                permissions.request_camera_permission().await
            },
            |granted| cosmic::Action::App(Message::CameraPermission(granted)),
        )
    }

    /// Request storage access; on the first run also sweep stale captures
    pub(crate) fn request_storage_permission_task(
        &self,
        permissions: PermissionManager,
        sweep: bool,
    ) -> Task<cosmic::Action<Message>> {
        let files = self.files.clone();
        Task::perform(
            async move {
                let granted = permissions.has_storage_permission().await
                    || permissions.request_storage_permission().await;
                if granted
                    && sweep
                    && let Err(e) = files.prepare().await
                {
                    warn!(error = %e, "Failed to prepare capture cache");
                    return false;
                }
                granted
            },
            |granted| cosmic::Action::App(Message::StoragePermission(granted)),
        )
    }

    pub(crate) fn handle_camera_permission(
        &mut self,
        granted: bool,
    ) -> Task<cosmic::Action<Message>> {
        info!(granted, "Camera permission");
        self.reduce(|state| state.with_camera_permission(granted));
        if granted {
            Task::none()
        } else {
            warn!("Camera permission denied");
            self.viewfinder = None;
            self.push_toast(fl!("camera-permission-denied"))
        }
    }

    pub(crate) fn handle_storage_permission(
        &mut self,
        granted: bool,
    ) -> Task<cosmic::Action<Message>> {
        info!(granted, "Storage permission");
        self.reduce(|state| state.with_storage_permission(granted));
        if granted {
            Task::none()
        } else {
            warn!("Storage permission denied");
            self.push_toast(fl!("storage-permission-denied"))
        }
    }

    /// Re-request whatever is missing; `Ok` when nothing is
    pub(crate) fn ensure_permissions(
        &self,
        need_camera: bool,
    ) -> Result<(), Task<cosmic::Action<Message>>> {
        let mut requests = Vec::new();
        if need_camera && !self.state.camera_permission {
            info!("Camera permission missing, requesting again");
            requests.push(self.request_camera_permission_task(self.permission_manager()));
        }
        if !self.state.storage_permission {
            info!("Storage permission missing, requesting again");
            requests.push(self.request_storage_permission_task(self.permission_manager(), false));
        }

        if requests.is_empty() {
            Ok(())
        } else {
            Err(Task::batch(requests))
        }
    }
}
