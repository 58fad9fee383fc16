//! CLI output formatting.
//!
//! One line per attempted conversion goes to stdout, written before the
//! output file so it shows even when the write then fails:
//!
//! ```text
//! trip/dawn.jpg => trip/dawn_1024x768.jpg
//! trip/dusk.jpg => trip/dusk_1024x768.2.jpg
//! ```
//!
//! A failed input goes to stderr with its full cause chain:
//!
//! ```text
//! error: trip/broken.jpg
//!     Decode failed for trip/broken.jpg
//!     caused by: failed to decode trip/broken.jpg
//!     caused by: Format error decoding Jpeg: ...
//! ```
//!
//! Format functions are pure and return strings for testability; the
//! `print_*` wrappers do the writing.

use crate::process::ProcessEvent;
use std::error::Error;
use std::path::Path;

/// `source => destination`
pub fn format_conversion(source: &Path, destination: &Path) -> String {
    format!("{} => {}", source.display(), destination.display())
}

/// Header line plus one line per error in the `source()` chain.
pub fn format_failure(source: &Path, error: &dyn Error) -> Vec<String> {
    let mut lines = vec![
        format!("error: {}", source.display()),
        format!("    {}", error),
    ];
    let mut cause = error.source();
    while let Some(e) = cause {
        lines.push(format!("    caused by: {}", e));
        cause = e.source();
    }
    lines
}

/// Write a process event to stdout (conversions) or stderr (failures).
pub fn print_process_event(event: &ProcessEvent<'_>) {
    match event {
        ProcessEvent::Converting {
            source,
            destination,
        } => println!("{}", format_conversion(source, destination)),
        ProcessEvent::Failed { source, error } => {
            for line in format_failure(source, *error) {
                eprintln!("{}", line);
            }
        }
    }
}

/// One-line fatal error for `main`, with causes joined by `: `.
pub fn format_fatal(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut cause = error.source();
    while let Some(e) = cause {
        message.push_str(": ");
        message.push_str(&e.to_string());
        cause = e.source();
    }
    message
}
