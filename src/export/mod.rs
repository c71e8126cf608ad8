//! Atlas export formats.
//!
//! This module writes atlas pixels as PNG and sprite regions as a JSON
//! manifest.

pub mod manifest;
pub mod png;

pub use manifest::AtlasManifest;
pub use png::{save_png, to_png};
