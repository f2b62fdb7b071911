//! JSON desired-record adapter.
//!
//! The file is an array of `{Name, Value, IsSensitive, IsEditable}` objects;
//! omitted flags take the adapter defaults baked into
//! [`VariableSpec`](varsync_core::types::VariableSpec)'s serde derives.

use std::path::Path;

use varsync_core::types::VariableSpec;

use crate::check_extension;
use crate::error::{io_err, SourceError};

/// Load desired records from a `.json` file in input order.
pub fn load(path: &Path) -> Result<Vec<VariableSpec>, SourceError> {
    check_extension(path, "json")?;

    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let specs: Vec<VariableSpec> =
        serde_json::from_str(&contents).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("loaded {} desired record(s) from {}", specs.len(), path.display());
    Ok(specs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
