//! Domain types for the varsync variable model.
//!
//! Wire field names are PascalCase (`Name`, `Value`, `IsSensitive`, …) —
//! the shape the variable store serves and the desired-record files use.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// An opaque scope identifier assigned by the variable store (e.g. `"env-42"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScopeId(pub String);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ScopeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ScopeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// A scoping dimension understood by the variable store.
///
/// Reconciliation and export both operate over exactly one dimension at a
/// time; other dimensions on a record are carried through untouched.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum ScopeDimension {
    #[default]
    Environment,
    Machine,
    Role,
    Channel,
}

impl fmt::Display for ScopeDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeDimension::Environment => write!(f, "Environment"),
            ScopeDimension::Machine => write!(f, "Machine"),
            ScopeDimension::Role => write!(f, "Role"),
            ScopeDimension::Channel => write!(f, "Channel"),
        }
    }
}

// ---------------------------------------------------------------------------
// Scope set
// ---------------------------------------------------------------------------

/// The set of scope identifiers a variable applies to, per dimension.
///
/// An explicit set type: membership, widening, and narrowing go through
/// methods so a split always works on an owned copy — a record is never
/// aliased between a donor and a removal target. Removing the last id of a
/// dimension removes the dimension entry itself; an empty spec means the
/// variable is unscoped (global).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSpec {
    entries: BTreeMap<ScopeDimension, BTreeSet<ScopeId>>,
}

impl ScopeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// A spec holding exactly one id in one dimension.
    pub fn single(dimension: ScopeDimension, id: ScopeId) -> Self {
        let mut spec = Self::new();
        spec.insert(dimension, id);
        spec
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the spec carries any ids for `dimension`.
    pub fn has_dimension(&self, dimension: ScopeDimension) -> bool {
        self.entries.contains_key(&dimension)
    }

    pub fn contains(&self, dimension: ScopeDimension, id: &ScopeId) -> bool {
        self.entries
            .get(&dimension)
            .is_some_and(|ids| ids.contains(id))
    }

    /// Number of ids in `dimension` (0 if the dimension is absent).
    pub fn count(&self, dimension: ScopeDimension) -> usize {
        self.entries.get(&dimension).map_or(0, BTreeSet::len)
    }

    pub fn ids(&self, dimension: ScopeDimension) -> Option<&BTreeSet<ScopeId>> {
        self.entries.get(&dimension)
    }

    /// Add `id` to `dimension`. Returns `false` if it was already present.
    pub fn insert(&mut self, dimension: ScopeDimension, id: ScopeId) -> bool {
        self.entries.entry(dimension).or_default().insert(id)
    }

    /// Remove `id` from `dimension`, dropping the dimension entry if it
    /// becomes empty. Returns `false` if the id was not present.
    pub fn remove(&mut self, dimension: ScopeDimension, id: &ScopeId) -> bool {
        let Some(ids) = self.entries.get_mut(&dimension) else {
            return false;
        };
        let removed = ids.remove(id);
        if ids.is_empty() {
            self.entries.remove(&dimension);
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ScopeDimension, &BTreeSet<ScopeId>)> {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Remote records
// ---------------------------------------------------------------------------

/// One variable as held by the remote store.
///
/// `value` is `None` when the store withholds it — it never returns the
/// stored value of a sensitive variable on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    pub is_sensitive: bool,
    pub is_editable: bool,
    #[serde(default)]
    pub scope: ScopeSpec,
}

impl Variable {
    /// Materialize a desired record as a new remote record scoped to exactly
    /// one id of one dimension. Used by the reconciler's create and split
    /// paths.
    pub fn from_spec(spec: &VariableSpec, dimension: ScopeDimension, id: ScopeId) -> Self {
        Self {
            name: spec.name.clone(),
            value: Some(spec.value.clone()),
            is_sensitive: spec.is_sensitive,
            is_editable: spec.is_editable,
            scope: ScopeSpec::single(dimension, id),
        }
    }
}

/// The store's known scope values for one dimension: `(id, human name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScopeRef {
    pub id: ScopeId,
    pub name: String,
}

/// Scope values advertised by a variable set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScopeValues {
    #[serde(default)]
    pub environments: Vec<ScopeRef>,
}

/// A project's full variable collection as served by the store.
///
/// `variables` ordering is not semantically significant but is preserved
/// through fetch, reconcile, and commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariableSet {
    pub id: String,
    pub owner_id: String,
    pub version: u32,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub scope_values: ScopeValues,
}

// ---------------------------------------------------------------------------
// Desired records
// ---------------------------------------------------------------------------

fn default_editable() -> bool {
    true
}

/// One desired variable as produced by a source adapter.
///
/// Sources that omit the flags get `sensitive = false`, `editable = true`.
/// This is also the JSON desired-record file format (§ array of
/// `{Name, Value, IsSensitive, IsEditable}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariableSpec {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_sensitive: bool,
    #[serde(default = "default_editable")]
    pub is_editable: bool,
}

impl VariableSpec {
    /// A non-sensitive, editable spec — the common case.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_sensitive: false,
            is_editable: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
