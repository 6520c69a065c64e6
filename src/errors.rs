// SPDX-License-Identifier: MPL-2.0

//! Error types for the camera application

use std::fmt;
use std::path::Path;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Cache directory and file errors
    Storage(StorageError),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Camera initialization failed
    InitializationFailed(String),
    /// The viewfinder has not delivered a frame yet
    NoFrameAvailable,
    /// Encoding the captured frame failed
    EncodingFailed(String),
    /// A capture is already running
    Busy,
}

/// Storage errors, each carrying the path involved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Cache directory could not be created or is not writable
    CacheUnavailable(String),
    /// Writing image bytes failed
    WriteFailed { path: String, reason: String },
    /// Copying an imported file failed
    CopyFailed { path: String, reason: String },
    /// Deleting a roll entry failed
    DeleteFailed { path: String, reason: String },
    /// Decoding an image for display failed
    DecodeFailed { path: String, reason: String },
}

/// Permission errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// D-Bus session or portal unreachable
    PortalUnavailable(String),
    /// The user declined access
    Denied,
}

impl StorageError {
    pub fn write(path: &Path, err: impl fmt::Display) -> Self {
        StorageError::WriteFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub fn copy(path: &Path, err: impl fmt::Display) -> Self {
        StorageError::CopyFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub fn delete(path: &Path, err: impl fmt::Display) -> Self {
        StorageError::DeleteFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub fn decode(path: &Path, err: impl fmt::Display) -> Self {
        StorageError::DecodeFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            CameraError::NoFrameAvailable => write!(f, "No frame available for capture"),
            CameraError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            CameraError::Busy => write!(f, "Camera is busy"),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::CacheUnavailable(msg) => write!(f, "Cache directory unavailable: {}", msg),
            StorageError::WriteFailed { path, reason } => {
                write!(f, "Could not write {}: {}", path, reason)
            }
            StorageError::CopyFailed { path, reason } => {
                write!(f, "Could not copy {}: {}", path, reason)
            }
            StorageError::DeleteFailed { path, reason } => {
                write!(f, "Could not delete {}: {}", path, reason)
            }
            StorageError::DecodeFailed { path, reason } => {
                write!(f, "Could not decode {}: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::PortalUnavailable(msg) => write!(f, "Portal unavailable: {}", msg),
            PermissionError::Denied => write!(f, "Access denied"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for StorageError {}
impl std::error::Error for PermissionError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<zbus::Error> for PermissionError {
    fn from(err: zbus::Error) -> Self {
        PermissionError::PortalUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_names_the_path() {
        let err = StorageError::delete(Path::new("/tmp/IMG_1.jpg"), "permission denied");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/IMG_1.jpg"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn app_error_wraps_camera_error() {
        let err: AppError = CameraError::NoFrameAvailable.into();
        assert_eq!(
            err.to_string(),
            "Camera error: No frame available for capture"
        );
    }
}
