//! Error types for varsync-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ScopeId;

/// Scope name/id resolution failures.
///
/// Resolution failure is a configuration error, never retried.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// The target scope name is not among the store's known scope values.
    #[error("unknown scope name '{0}'")]
    UnknownName(String),

    /// A record carries a scope id the store no longer advertises.
    #[error("unknown scope id '{0}'")]
    UnknownId(ScopeId),
}

/// All errors that can arise from loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error on load — includes file path and serde context.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required field is absent or empty.
    #[error("settings at {path} need a non-empty '{field}'")]
    Missing { path: PathBuf, field: &'static str },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SettingsError {
    SettingsError::Io {
        path: path.into(),
        source,
    }
}
