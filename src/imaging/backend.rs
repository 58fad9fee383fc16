//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the capabilities the batch processor
//! needs from an imaging library: decode a file into pixels, stretch pixels
//! into a new box, and encode pixels into a container. Writing the encoded
//! bytes to disk stays with the caller so naming and I/O errors are handled
//! in one place.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::params::{EncodeParams, OutputFormat, ResizeParams};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{format} encode failed")]
    Encode {
        format: OutputFormat,
        #[source]
        source: image::ImageError,
    },
    #[error("no {0} encoder is available in this build")]
    EncoderUnavailable(OutputFormat),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(image: &DynamicImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// Keeps the rest of the crate independent of the imaging library so tests
/// can substitute synthetic pixel sources and capture encoded output.
pub trait ImageBackend {
    /// Fail if the configured output format cannot be encoded at all.
    ///
    /// Called once before a batch starts.
    fn ensure_encoder(&self, format: OutputFormat) -> Result<(), BackendError>;

    /// Decode the file at `path` into a pixel buffer.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Scale the full frame of `image` into exactly `params.width` by
    /// `params.height`.
    fn resize(
        &self,
        image: &DynamicImage,
        params: &ResizeParams,
    ) -> Result<DynamicImage, BackendError>;

    /// Encode `image` into the bytes of an output file.
    fn encode(&self, image: &DynamicImage, params: &EncodeParams) -> Result<Vec<u8>, BackendError>;
}
