//! Image processing on the `image` crate, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format sniffed from content) |
//! | **Resize** | `resize_exact`, full-frame stretch |
//! | **Encode** | `JpegEncoder` with quality, `PngEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for output geometry (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{ScalePolicy, plan_geometry};
pub use params::{EncodeParams, OutputFormat, Quality, ResizeParams};
pub use rust_backend::RustBackend;
