//! # varsync-client
//!
//! Blocking client for the remote variable store and the [`StoreSession`]
//! owning one in-memory snapshot per reconciliation batch.

pub mod client;
pub mod error;
pub mod session;

pub use client::{ProjectResource, StoreClient, API_KEY_HEADER};
pub use error::ClientError;
pub use session::StoreSession;
