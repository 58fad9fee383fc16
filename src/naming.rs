//! Output filename resolution.
//!
//! Every output lands next to its source as `{stem}_{W}x{H}.{ext}`. When that
//! name is taken, a numeric counter is spliced in before the extension,
//! starting at 2:
//!
//! ```text
//! dawn_1024x683.jpg
//! dawn_1024x683.2.jpg
//! dawn_1024x683.3.jpg
//! ```
//!
//! The filesystem is consulted on every call and nothing is reserved, so two
//! inputs that map to the same stem within one batch only stay apart because
//! the first output is written before the second name is resolved. Resolving
//! names from several threads at once would race.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Base name of an output before any collision counter: `{stem}_{W}x{H}`.
///
/// The stem is kept as raw OS bytes, so names that are not valid UTF-8 come
/// through unchanged.
pub fn sized_stem(stem: &OsStr, size: (u32, u32)) -> OsString {
    let mut name = stem.to_os_string();
    name.push(format!("_{}x{}", size.0, size.1));
    name
}

fn file_name(base: &OsStr, counter: Option<u64>, extension: &str) -> OsString {
    let mut name = base.to_os_string();
    if let Some(n) = counter {
        name.push(format!(".{}", n));
    }
    name.push(".");
    name.push(extension);
    name
}

/// Pick a destination path in `dir` that does not exist yet.
///
/// - `("dawn", (1024, 683), "jpg")` → `dir/dawn_1024x683.jpg`
/// - … with that taken → `dir/dawn_1024x683.2.jpg`, then `.3.jpg`, …
pub fn resolve_output_path(
    dir: &Path,
    stem: &OsStr,
    size: (u32, u32),
    extension: &str,
) -> PathBuf {
    let base = sized_stem(stem, size);

    let first = dir.join(file_name(&base, None, extension));
    if !first.exists() {
        return first;
    }

    let mut counter = 2u64;
    loop {
        let candidate = dir.join(file_name(&base, Some(counter), extension));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Directory and extension-less file name of a source path.
///
/// A bare file name resolves to an empty directory, so outputs are written
/// relative to the working directory just like the input was read.
pub fn split_source(path: &Path) -> (PathBuf, OsString) {
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let stem = path.file_stem().map(OsStr::to_os_string).unwrap_or_default();
    (dir, stem)
}
