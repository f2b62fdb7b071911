//! Semicolon-delimited CSV desired-record adapter.
//!
//! Record shape: `name;value[;sensitive[;editable]]`, one record per line,
//! booleans as literal `true`/`false`. Omitted flags default to
//! `sensitive = false`, `editable = true`.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use varsync_core::types::VariableSpec;

use crate::check_extension;
use crate::error::{format_err, io_err, SourceError};

/// Load desired records from a `.csv` file in input order.
pub fn load(path: &Path) -> Result<Vec<VariableSpec>, SourceError> {
    check_extension(path, "csv")?;

    let file = File::open(path).map_err(|e| io_err(path, e))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut specs = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 1;
        let record =
            record.map_err(|e| format_err(path, format!("line {line}: {e}")))?;
        if record.len() < 2 {
            return Err(format_err(
                path,
                format!("line {line}: expected 'name;value[;sensitive[;editable]]'"),
            ));
        }

        let mut spec = VariableSpec::new(&record[0], &record[1]);
        if let Some(raw) = record.get(2) {
            spec.is_sensitive = parse_flag(path, line, "sensitive", raw)?;
        }
        if let Some(raw) = record.get(3) {
            spec.is_editable = parse_flag(path, line, "editable", raw)?;
        }
        specs.push(spec);
    }

    tracing::debug!("loaded {} desired record(s) from {}", specs.len(), path.display());
    Ok(specs)
}

fn parse_flag(path: &Path, line: usize, field: &str, raw: &str) -> Result<bool, SourceError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(format_err(
            path,
            format!("line {line}: '{field}' must be 'true' or 'false', got '{other}'"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
