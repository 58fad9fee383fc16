//! Batch conversion.
//!
//! Takes the input paths in the order given and converts each one
//! independently:
//!
//! ```text
//! decode → plan geometry → resize → resolve name → report → encode → write
//! ```
//!
//! A failure at any step is recorded against that input and the batch moves
//! on to the next path. The only error that stops a batch is the encoder
//! check made before the first file, since nothing could be written without
//! it.
//!
//! ## Output Placement
//!
//! ```text
//! trip/
//! ├── dawn.jpg                 # input, 4000x3000
//! ├── dawn_1024x768.jpg        # first run
//! └── dawn_1024x768.2.jpg      # second run, or a second `dawn.*` input
//! ```
//!
//! Processing is strictly sequential. Names are resolved against the
//! filesystem right before each write (see [`crate::naming`]), so two inputs
//! with the same stem in one directory end up in distinct files.

use crate::config::Configuration;
use crate::imaging::{
    BackendError, Dimensions, EncodeParams, ImageBackend, OutputFormat, Quality, ResizeParams,
    ScalePolicy, plan_geometry,
};
use crate::naming::{resolve_output_path, split_source};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Decode failed for {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Resize to {width}x{height} failed")]
    Resize {
        width: u32,
        height: u32,
        #[source]
        source: BackendError,
    },
    #[error("Encode failed for {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Could not write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings for one batch, resolved from the [`Configuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    pub format: OutputFormat,
    pub max_resolution: u32,
    pub quality: Quality,
    pub policy: ScalePolicy,
}

impl BatchSettings {
    /// Build settings from config values. Quality is clamped here.
    pub fn from_config(config: &Configuration, policy: ScalePolicy) -> Self {
        Self {
            format: config.format,
            max_resolution: config.max_resolution,
            quality: config.quality(),
            policy,
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self::from_config(&Configuration::default(), ScalePolicy::default())
    }
}

/// Progress notifications, emitted in input order.
#[derive(Debug)]
pub enum ProcessEvent<'a> {
    /// About to write `destination`. Sent before the encode, so it also
    /// appears for conversions whose write then fails.
    Converting {
        source: &'a Path,
        destination: &'a Path,
    },
    /// `source` was not converted.
    Failed {
        source: &'a Path,
        error: &'a ProcessError,
    },
}

/// A written output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub source_size: (u32, u32),
    pub output_size: (u32, u32),
}

/// An input that could not be converted.
#[derive(Debug)]
pub struct Failure {
    pub source: PathBuf,
    pub error: ProcessError,
}

/// Outcome of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<Conversion>,
    pub failed: Vec<Failure>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Convert every path in `paths` with `backend`.
///
/// Fails only if the backend cannot encode `settings.format`; per-file
/// problems are collected in the returned [`BatchReport`] and passed to
/// `on_event` as they happen.
pub fn process_batch<P: AsRef<Path>>(
    backend: &impl ImageBackend,
    paths: &[P],
    settings: &BatchSettings,
    mut on_event: impl FnMut(ProcessEvent<'_>),
) -> Result<BatchReport, BackendError> {
    backend.ensure_encoder(settings.format)?;

    let mut report = BatchReport::default();

    for path in paths {
        let source = path.as_ref();
        match convert_one(backend, source, settings, &mut on_event) {
            Ok(conversion) => report.converted.push(conversion),
            Err(error) => {
                on_event(ProcessEvent::Failed {
                    source,
                    error: &error,
                });
                report.failed.push(Failure {
                    source: source.to_path_buf(),
                    error,
                });
            }
        }
    }

    debug!(
        converted = report.converted.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    Ok(report)
}

/// Run the full pipeline for a single input.
fn convert_one(
    backend: &impl ImageBackend,
    source: &Path,
    settings: &BatchSettings,
    on_event: &mut impl FnMut(ProcessEvent<'_>),
) -> Result<Conversion, ProcessError> {
    let image = backend
        .decode(source)
        .map_err(|e| ProcessError::Decode {
            path: source.to_path_buf(),
            source: e,
        })?;
    let source_size = Dimensions::of(&image).as_tuple();

    let (width, height) = plan_geometry(source_size, settings.max_resolution, settings.policy);
    debug!(
        source = %source.display(),
        from = ?source_size,
        to = ?(width, height),
        "planned resize"
    );

    let resized = backend
        .resize(&image, &ResizeParams { width, height })
        .map_err(|e| ProcessError::Resize {
            width,
            height,
            source: e,
        })?;
    drop(image);

    let (dir, stem) = split_source(source);
    let destination = resolve_output_path(&dir, &stem, (width, height), settings.format.extension());

    on_event(ProcessEvent::Converting {
        source,
        destination: &destination,
    });

    let bytes = backend
        .encode(
            &resized,
            &EncodeParams {
                format: settings.format,
                quality: settings.quality,
            },
        )
        .map_err(|e| ProcessError::Encode {
            path: destination.clone(),
            source: e,
        })?;

    write_new_file(&destination, &bytes).map_err(|e| ProcessError::Write {
        path: destination.clone(),
        source: e,
    })?;

    Ok(Conversion {
        source: source.to_path_buf(),
        destination,
        source_size,
        output_size: (width, height),
    })
}

/// Write `bytes` to a file that must not exist yet.
///
/// The name was checked free just before; `create_new` turns a file appearing
/// in between into an error instead of an overwrite.
fn write_new_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
