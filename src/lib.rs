// SPDX-License-Identifier: MPL-2.0

//! Shutter - a photo capture app for the COSMIC desktop
//!
//! Take photos, import existing images, and review them in a camera roll.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Main application logic and UI
//! - [`backends`]: Camera backend abstraction and capture controller
//! - [`pipelines`]: Photo encoding
//! - [`permissions`]: Camera and storage access
//! - [`config`]: User configuration handling
//! - [`storage`]: Capture cache and thumbnails

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod permissions;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, Message, ViewState};
pub use config::Config;
pub use errors::{AppError, AppResult};
