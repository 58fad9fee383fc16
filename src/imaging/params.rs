//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! the batch processor (which decides sizes and formats) and the
//! [`backend`](super::backend) (which does the pixel work), so a mock backend
//! can stand in for the real one without touching the pipeline logic.
//!
//! ## Types
//!
//! - [`Quality`] — Encoder quality (0–100). Clamped on construction.
//! - [`OutputFormat`] — The two supported output containers.
//! - [`ResizeParams`] — Target box for a full-frame resize.
//! - [`EncodeParams`] — Output format plus quality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quality setting for image encoding (0-100).
///
/// Only meaningful for JPEG; PNG is lossless and ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    /// Clamp an arbitrary stored value into the encoder's range.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Output container. Serialized by variant name (`"Jpeg"`, `"Png"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    /// File extension written for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Jpeg => f.write_str("JPEG"),
            OutputFormat::Png => f.write_str("PNG"),
        }
    }
}

/// Parameters for a full-frame resize (no crop, no letterbox).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
}

/// Parameters for encoding a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    pub format: OutputFormat,
    pub quality: Quality,
}
