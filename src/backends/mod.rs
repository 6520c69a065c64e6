// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for camera capture
//!
//! - [`camera`]: device enumeration, viewfinder streaming and still capture

pub mod camera;
