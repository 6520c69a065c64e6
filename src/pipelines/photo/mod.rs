// SPDX-License-Identifier: MPL-2.0

//! Async photo pipeline
//!
//! The controller hands over the latest viewfinder frame; this module encodes
//! it. Writing the bytes to disk is left to [`crate::storage::FileManager`].

pub mod encoding;

pub use encoding::{EncodedImage, PhotoEncoder};
