//! # varsync-source
//!
//! Desired-record adapters: semicolon CSV, JSON, and the legacy XML config.
//!
//! Every adapter produces an ordered `Vec<VariableSpec>` with the defaults
//! `sensitive = false`, `editable = true`, and validates the file extension
//! against the declared format before reading — a mismatch fails the run
//! before any remote access.

pub mod csv;
pub mod error;
pub mod json;
pub mod legacy;

use std::path::Path;

pub use error::SourceError;
use varsync_core::settings::SourceFormat;
use varsync_core::types::VariableSpec;

/// Load desired records from `path` according to the declared `format`.
pub fn load(format: SourceFormat, path: &Path) -> Result<Vec<VariableSpec>, SourceError> {
    match format {
        SourceFormat::Csv => csv::load(path),
        SourceFormat::Json => json::load(path),
    }
}

pub(crate) fn check_extension(path: &Path, expected: &str) -> Result<(), SourceError> {
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(expected));
    if matches {
        Ok(())
    } else {
        Err(error::format_err(
            path,
            format!("expected a .{expected} file"),
        ))
    }
}
