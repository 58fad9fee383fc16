//! Sidecar configuration.
//!
//! The configuration lives in a `config.json` beside the executable and is
//! read once before a batch and written back once after it. Users edit the
//! file between runs; the program never changes the values itself.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "Format": "Jpeg",
//!   "MaxResolution": 1024,
//!   "Quality": 80
//! }
//! ```
//!
//! - `Format`: `"Jpeg"` or `"Png"`. Also decides the output extension.
//! - `MaxResolution`: bound on the longer output side, in pixels. Must be
//!   positive.
//! - `Quality`: encoder quality. Stored as written; clamped to 0-100 when
//!   used. Ignored for PNG.
//!
//! ## Defaulting
//!
//! Loading never fails. A missing file, an unreadable file, invalid JSON, or
//! values that fail [`Configuration::validate`] all fall back to
//! [`Configuration::default`]. Keys absent from an otherwise valid file take
//! their default value and unknown keys are ignored. Saving always rewrites
//! the whole file, so a first run leaves a complete file behind to edit.

use crate::imaging::{OutputFormat, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// File name of the sidecar, resolved against the executable's directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("cannot locate the program directory")]
    ProgramDir(#[source] std::io::Error),
}

/// Persisted conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Configuration {
    /// Output container and extension.
    pub format: OutputFormat,
    /// Bound on the longer output side.
    pub max_resolution: u32,
    /// Encoder quality as written in the file. Use [`Configuration::quality`]
    /// for the clamped value.
    #[serde(rename = "Quality")]
    pub raw_quality: i32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            max_resolution: 1024,
            raw_quality: 80,
        }
    }
}

impl Configuration {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_resolution == 0 {
            return Err(ConfigError::Validation(
                "MaxResolution must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Quality clamped into the encoder's 0-100 range.
    pub fn quality(&self) -> Quality {
        Quality::new(self.raw_quality)
    }
}

/// Loads and saves the [`Configuration`] at a fixed sidecar path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `config.json` in the directory holding the running executable.
    pub fn beside_executable() -> Result<Self, ConfigError> {
        let exe = std::env::current_exe().map_err(ConfigError::ProgramDir)?;
        let dir = exe.parent().ok_or_else(|| {
            ConfigError::ProgramDir(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} has no parent directory", exe.display()),
            ))
        })?;
        Ok(Self::new(dir.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the sidecar.
    ///
    /// Returns `Ok(None)` if no file exists. Returns `Err` if the file exists
    /// but cannot be read, parsed, or validated.
    pub fn try_load(&self) -> Result<Option<Configuration>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let config: Configuration = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Load the sidecar, substituting defaults for anything unusable.
    pub fn load(&self) -> Configuration {
        match self.try_load() {
            Ok(Some(config)) => {
                debug!(path = %self.path.display(), ?config, "loaded configuration");
                config
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "no configuration file, using defaults");
                Configuration::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unusable configuration file");
                Configuration::default()
            }
        }
    }

    /// Overwrite the sidecar with `config` as indented JSON.
    pub fn save(&self, config: &Configuration) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut json = serde_json::to_string_pretty(config)?;
        json.push('\n');
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }
}
