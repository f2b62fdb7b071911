//! Error types for varsync-client.

use thiserror::Error;

use varsync_core::error::ScopeError;

/// All errors that can arise from talking to the variable store.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The store rejected the request for permission reasons (HTTP 401/403).
    /// Never retried — indicates a credential or authorization problem.
    #[error("access denied by the variable store (HTTP {status}): {message}")]
    AccessDenied { status: u16, message: String },

    /// Any other failed request: transport failure or non-auth error status.
    #[error("{operation} failed: {detail}")]
    Request { operation: String, detail: String },

    /// The store answered with a body this client cannot parse.
    #[error("unexpected response from the variable store: {0}")]
    Malformed(String),

    /// The configured project does not exist on the server.
    #[error("project '{name}' not found on the server")]
    ProjectNotFound { name: String },

    /// Scope resolution failure surfaced through the session.
    #[error(transparent)]
    Scope(#[from] ScopeError),
}
