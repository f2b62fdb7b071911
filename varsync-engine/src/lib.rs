//! # varsync-engine
//!
//! The variable reconciliation engine and the export projector.
//!
//! Call [`reconcile`] with a mutable [`VariableSet`](varsync_core::types::VariableSet)
//! snapshot, a target scope id, and the desired records for that scope; commit
//! the mutated set afterwards through the store session. [`export::project`]
//! turns a snapshot into the human-readable export form.

pub mod error;
pub mod export;
pub mod reconcile;

pub use error::EngineError;
pub use export::{project, write_export, ExportedVariable};
pub use reconcile::{reconcile, ReconcileAction, ReconcileOutcome, ReconcileReport};
