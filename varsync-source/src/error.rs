//! Error types for varsync-source.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from reading a desired-record source.
///
/// Every variant is fatal for the whole run and is raised before any remote
/// read or write.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Underlying I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file does not match the declared source format (wrong extension,
    /// malformed row, non-boolean flag, wrong root element, …).
    #[error("source file {path} does not match the declared format: {reason}")]
    Format { path: PathBuf, reason: String },

    /// JSON (de)serialization error for the desired-record format.
    #[error("failed to parse desired records at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The legacy config is not well-formed XML.
    #[error("failed to parse legacy config at {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SourceError {
    SourceError::Io {
        path: path.into(),
        source,
    }
}

pub(crate) fn format_err(path: impl Into<PathBuf>, reason: impl Into<String>) -> SourceError {
    SourceError::Format {
        path: path.into(),
        reason: reason.into(),
    }
}
