//! Bidirectional scope name ↔ id index.
//!
//! Built once per session snapshot from the store's advertised scope values.
//! No mutation after construction — a refreshed snapshot builds a new index.

use std::collections::BTreeMap;

use crate::error::ScopeError;
use crate::types::{ScopeId, ScopeRef};

/// Maps environment names to opaque scope ids and back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeIndex {
    by_name: BTreeMap<String, ScopeId>,
    by_id: BTreeMap<ScopeId, String>,
}

impl ScopeIndex {
    /// Build an index from the store's known `(id, name)` pairs.
    pub fn new(refs: &[ScopeRef]) -> Self {
        let mut index = Self::default();
        for r in refs {
            index.by_name.insert(r.name.clone(), r.id.clone());
            index.by_id.insert(r.id.clone(), r.name.clone());
        }
        index
    }

    /// Resolve a human-readable scope name to its id.
    pub fn resolve(&self, name: &str) -> Result<&ScopeId, ScopeError> {
        self.by_name
            .get(name)
            .ok_or_else(|| ScopeError::UnknownName(name.to_owned()))
    }

    /// Look up the human-readable name for a scope id.
    pub fn name_of(&self, id: &ScopeId) -> Result<&str, ScopeError> {
        self.by_id
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| ScopeError::UnknownId(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
