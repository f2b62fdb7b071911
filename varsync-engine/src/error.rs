//! Error types for varsync-engine.

use std::path::PathBuf;

use thiserror::Error;

use varsync_core::error::ScopeError;

/// All errors that can arise from the export projector.
///
/// The reconciler itself is infallible — per-record problems are isolated
/// into the report, never raised.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A scope id in the collection is unknown to the index.
    #[error("scope resolution failed: {0}")]
    Scope(#[from] ScopeError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (export document).
    #[error("export JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> EngineError {
    EngineError::Io {
        path: path.into(),
        source,
    }
}
