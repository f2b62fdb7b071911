//! varsync core library — domain types, scope index, settings, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and variable/scope domain structs
//! - [`scope`] — [`ScopeIndex`]
//! - [`settings`] — [`Settings`] and [`SourceFormat`]
//! - [`error`] — [`ScopeError`], [`SettingsError`]

pub mod error;
pub mod scope;
pub mod settings;
pub mod types;

pub use error::{ScopeError, SettingsError};
pub use scope::ScopeIndex;
pub use settings::{Settings, SourceFormat, SETTINGS_FILE};
pub use types::{
    ScopeDimension, ScopeId, ScopeRef, ScopeSpec, ScopeValues, Variable, VariableSet,
    VariableSpec,
};
