//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image::ImageReader` with content sniffing |
//! | Resize | `DynamicImage::resize_exact` with `Triangle` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality-aware, RGB8) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (lossless) |

use super::backend::{BackendError, ImageBackend};
use super::params::{EncodeParams, OutputFormat, ResizeParams};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, Limits};
use std::io::Cursor;
use std::path::Path;

/// Backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn image_format(format: OutputFormat) -> ImageFormat {
    match format {
        OutputFormat::Jpeg => ImageFormat::Jpeg,
        OutputFormat::Png => ImageFormat::Png,
    }
}

/// Bytes `resize_exact` needs for a target box: the f32 RGBA intermediate
/// (source width by target height) plus an 8-bit RGBA result.
fn resize_allocation(source_width: u32, target: &ResizeParams) -> Option<u64> {
    let intermediate = u64::from(source_width)
        .checked_mul(u64::from(target.height))?
        .checked_mul(16)?;
    let result = u64::from(target.width)
        .checked_mul(u64::from(target.height))?
        .checked_mul(4)?;
    intermediate.checked_add(result)
}

impl ImageBackend for RustBackend {
    fn ensure_encoder(&self, format: OutputFormat) -> Result<(), BackendError> {
        if image_format(format).writing_enabled() {
            Ok(())
        } else {
            Err(BackendError::EncoderUnavailable(format))
        }
    }

    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        // Sniff the header so a mislabeled extension still decodes.
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|source| BackendError::Decode {
                path: path.to_path_buf(),
                source,
            })
    }

    fn resize(
        &self,
        image: &DynamicImage,
        params: &ResizeParams,
    ) -> Result<DynamicImage, BackendError> {
        if params.width == 0 || params.height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "invalid target size {}x{}",
                params.width, params.height
            )));
        }
        // Refuse before allocating; a failed allocation aborts the process.
        let limit = Limits::default().max_alloc.unwrap_or(u64::MAX);
        match resize_allocation(image.width(), params) {
            Some(bytes) if bytes <= limit => {}
            _ => {
                return Err(BackendError::ProcessingFailed(format!(
                    "target size {}x{} exceeds the {} byte allocation limit",
                    params.width, params.height, limit
                )));
            }
        }
        Ok(image.resize_exact(params.width, params.height, FilterType::Triangle))
    }

    fn encode(&self, image: &DynamicImage, params: &EncodeParams) -> Result<Vec<u8>, BackendError> {
        let mut buf = Cursor::new(Vec::new());

        let result = match params.format {
            OutputFormat::Jpeg => {
                // JPEG has no alpha channel
                let encoder = JpegEncoder::new_with_quality(&mut buf, params.quality.value());
                image.to_rgb8().write_with_encoder(encoder)
            }
            OutputFormat::Png => image.write_with_encoder(PngEncoder::new(&mut buf)),
        };

        result.map_err(|source| BackendError::Encode {
            format: params.format,
            source,
        })?;
        Ok(buf.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Quality;
    use image::{ImageEncoder, RgbImage, RgbaImage};

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    fn encode_params(format: OutputFormat, quality: i32) -> EncodeParams {
        EncodeParams {
            format,
            quality: Quality::new(quality),
        }
    }

    #[test]
    fn both_output_encoders_are_compiled_in() {
        let backend = RustBackend::new();
        assert!(backend.ensure_encoder(OutputFormat::Jpeg).is_ok());
        assert!(backend.ensure_encoder(OutputFormat::Png).is_ok());
    }

    #[test]
    fn decode_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let image = RustBackend::new().decode(&path).unwrap();
        assert_eq!(image.width(), 200);
        assert_eq!(image.height(), 150);
    }

    #[test]
    fn decode_ignores_misleading_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("actually-a-jpeg.png");
        create_test_jpeg(&path, 32, 16);

        let image = RustBackend::new().decode(&path).unwrap();
        assert_eq!((image.width(), image.height()), (32, 16));
    }

    #[test]
    fn decode_nonexistent_file_is_io_error() {
        let result = RustBackend::new().decode(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn decode_garbage_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("notes.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        assert!(RustBackend::new().decode(&path).is_err());
    }

    #[test]
    fn resize_stretches_full_frame() {
        let image = DynamicImage::new_rgb8(300, 100);
        let resized = RustBackend::new()
            .resize(
                &image,
                &ResizeParams {
                    width: 50,
                    height: 50,
                },
            )
            .unwrap();
        assert_eq!((resized.width(), resized.height()), (50, 50));
    }

    #[test]
    fn resize_rejects_empty_target() {
        let image = DynamicImage::new_rgb8(10, 10);
        let result = RustBackend::new().resize(
            &image,
            &ResizeParams {
                width: 0,
                height: 10,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn resize_refuses_oversized_target() {
        let image = DynamicImage::new_rgb8(4, 4);
        let result = RustBackend::new().resize(
            &image,
            &ResizeParams {
                width: 4_000_000_000,
                height: 4_000_000_000,
            },
        );
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn resize_allocation_accounts_for_source_width() {
        let target = ResizeParams {
            width: 10,
            height: 20,
        };
        assert_eq!(resize_allocation(100, &target), Some(100 * 20 * 16 + 10 * 20 * 4));
        assert_eq!(
            resize_allocation(
                u32::MAX,
                &ResizeParams {
                    width: u32::MAX,
                    height: u32::MAX,
                }
            ),
            None
        );
    }

    #[test]
    fn encode_jpeg_has_magic_bytes() {
        let image = DynamicImage::new_rgb8(10, 10);
        let data = RustBackend::new()
            .encode(&image, &encode_params(OutputFormat::Jpeg, 80))
            .unwrap();
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encode_jpeg_drops_alpha() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
        let data = RustBackend::new()
            .encode(&image, &encode_params(OutputFormat::Jpeg, 0))
            .unwrap();
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encode_png_has_magic_bytes() {
        let image = DynamicImage::new_rgb8(10, 10);
        let data = RustBackend::new()
            .encode(&image, &encode_params(OutputFormat::Png, 80))
            .unwrap();
        assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn jpeg_quality_changes_output_size() {
        let img = RgbImage::from_fn(64, 64, |x, y| {
            image::Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8])
        });
        let image = DynamicImage::ImageRgb8(img);
        let backend = RustBackend::new();

        let low = backend
            .encode(&image, &encode_params(OutputFormat::Jpeg, 10))
            .unwrap();
        let high = backend
            .encode(&image, &encode_params(OutputFormat::Jpeg, 100))
            .unwrap();
        assert!(low.len() < high.len());
    }
}
