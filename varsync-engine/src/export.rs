//! Export projector — remote collection to serializable form.
//!
//! A pure, order-preserving transform: for the chosen dimension, opaque scope
//! ids are replaced by their human-readable names via the [`ScopeIndex`];
//! other dimensions keep their raw identifiers. Nothing else is altered.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use varsync_core::error::ScopeError;
use varsync_core::scope::ScopeIndex;
use varsync_core::types::{ScopeDimension, VariableSet};

use crate::error::{io_err, EngineError};

/// One variable in the export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportedVariable {
    pub name: String,
    pub value: Option<String>,
    pub is_sensitive: bool,
    pub is_editable: bool,
    /// Dimension name → scope names (substituted dimension) or raw ids.
    pub scope: BTreeMap<String, Vec<String>>,
}

/// Project the collection for one dimension, substituting scope names.
///
/// Fails with an unknown-scope error if a record carries an id of the chosen
/// dimension that the index does not know.
pub fn project(
    set: &VariableSet,
    dimension: ScopeDimension,
    index: &ScopeIndex,
) -> Result<Vec<ExportedVariable>, EngineError> {
    let mut exported = Vec::with_capacity(set.variables.len());

    for variable in &set.variables {
        let mut scope = BTreeMap::new();
        for (dim, ids) in variable.scope.iter() {
            let values = if *dim == dimension {
                ids.iter()
                    .map(|id| index.name_of(id).map(str::to_owned))
                    .collect::<Result<Vec<_>, ScopeError>>()?
            } else {
                ids.iter().map(|id| id.0.clone()).collect()
            };
            scope.insert(dim.to_string(), values);
        }

        exported.push(ExportedVariable {
            name: variable.name.clone(),
            value: variable.value.clone(),
            is_sensitive: variable.is_sensitive,
            is_editable: variable.is_editable,
            scope,
        });
    }

    Ok(exported)
}

/// Write an export document as pretty JSON, atomically (`.tmp` + rename).
pub fn write_export(path: &Path, variables: &[ExportedVariable]) -> Result<(), EngineError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    let json = serde_json::to_string_pretty(variables)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("exported {} variable(s) to {}", variables.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use varsync_core::types::{ScopeId, ScopeRef, ScopeSpec, ScopeValues, Variable};

    fn index() -> ScopeIndex {
        ScopeIndex::new(&[
            ScopeRef { id: ScopeId::from("env-1"), name: "production".to_string() },
            ScopeRef { id: ScopeId::from("env-2"), name: "staging".to_string() },
        ])
    }

    fn sample_set() -> VariableSet {
        let mut scope = ScopeSpec::single(ScopeDimension::Environment, ScopeId::from("env-1"));
        scope.insert(ScopeDimension::Environment, ScopeId::from("env-2"));
        scope.insert(ScopeDimension::Role, ScopeId::from("web-server"));

        VariableSet {
            id: "variableset-1".to_string(),
            owner_id: "projects-1".to_string(),
            version: 1,
            variables: vec![
                Variable {
                    name: "B-goes-second".to_string(),
                    value: Some("v".to_string()),
                    is_sensitive: false,
                    is_editable: true,
                    scope,
                },
                Variable {
                    name: "A-goes-last".to_string(),
                    value: None,
                    is_sensitive: true,
                    is_editable: true,
                    scope: ScopeSpec::new(),
                },
            ],
            scope_values: ScopeValues::default(),
        }
    }

    #[test]
    fn substitutes_names_for_chosen_dimension_only() {
        let exported = project(&sample_set(), ScopeDimension::Environment, &index()).unwrap();
        let scope = &exported[0].scope;
        assert_eq!(scope["Environment"], ["production", "staging"]);
        assert_eq!(scope["Role"], ["web-server"], "other dimensions keep raw ids");
    }

    #[test]
    fn preserves_collection_order() {
        let exported = project(&sample_set(), ScopeDimension::Environment, &index()).unwrap();
        let names: Vec<_> = exported.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["B-goes-second", "A-goes-last"]);
    }

    #[test]
    fn sensitive_value_exports_as_null() {
        let exported = project(&sample_set(), ScopeDimension::Environment, &index()).unwrap();
        let json = serde_json::to_string(&exported[1]).unwrap();
        assert!(json.contains(r#""Value":null"#), "got: {json}");
    }

    #[test]
    fn unknown_id_fails_the_projection() {
        let mut set = sample_set();
        set.variables[0]
            .scope
            .insert(ScopeDimension::Environment, ScopeId::from("env-9"));
        let err = project(&set, ScopeDimension::Environment, &index()).unwrap_err();
        assert!(err.to_string().contains("env-9"));
    }

    #[test]
    fn write_export_is_atomic_and_loadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        let exported = project(&sample_set(), ScopeDimension::Environment, &index()).unwrap();

        write_export(&path, &exported).expect("write");
        assert!(!path.with_extension("json.tmp").exists(), ".tmp must be cleaned up");

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
        assert_eq!(parsed[0]["Scope"]["Environment"][0], "production");
    }
}
