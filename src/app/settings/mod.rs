// SPDX-License-Identifier: GPL-3.0-only

//! Settings UI module
//!
//! Builds the settings drawer: camera, capture and appearance preferences.

pub mod view;
