// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines for still capture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │ Cache File   │
//! │   (RGBA)     │     │  - Encoding       │     │ (JPEG / PNG) │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! Heavy work runs on the blocking pool so the viewfinder keeps updating
//! while a photo is being encoded.

pub mod photo;
