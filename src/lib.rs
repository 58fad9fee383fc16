//! # downsize
//!
//! A batch image downscaler. Give it image paths; it writes a resized copy of
//! each one next to the original, in the format, size bound, and quality kept
//! in a `config.json` beside the executable.
//!
//! # Pipeline
//!
//! ```text
//! load config  →  for each path: decode → plan → resize → name → encode → write  →  save config
//! ```
//!
//! Every input is handled on its own. A file that cannot be decoded, encoded,
//! or written is reported and skipped; the rest of the batch still runs, and
//! the configuration is saved at the end either way so a first run leaves an
//! editable file with the defaults behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.json` loading with silent defaulting, and saving |
//! | [`imaging`] | Geometry planning, the [`imaging::ImageBackend`] trait, and the `image`-crate backend |
//! | [`naming`] | `{stem}_{W}x{H}[.N].{ext}` output names that never clobber existing files |
//! | [`process`] | The per-file pipeline and failure isolation |
//! | [`output`] | Console formatting of conversions and failures |
//!
//! # Design Decisions
//!
//! ## Always Fit the Bound
//!
//! By default the longer side of every output equals `MaxResolution`, so
//! images smaller than the bound are scaled up. The behaviour is a named
//! policy, [`imaging::ScalePolicy::AlwaysFit`]; `--no-upscale` selects
//! [`imaging::ScalePolicy::ShrinkOnly`] instead.
//!
//! ## Sequential Only
//!
//! Output names are chosen by checking which files exist, then writing. That
//! is only sound while one file is processed at a time, which is what
//! [`process::process_batch`] does.
//!
//! ## Exit Status
//!
//! Per-file failures do not change the exit status unless `--strict` is
//! given. Startup failures (no encoder for the configured format) and a
//! failure to save the configuration exit non-zero.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
