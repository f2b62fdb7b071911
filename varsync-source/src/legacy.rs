//! Legacy XML config adapter and converter.
//!
//! Reads a `.config` document of the shape
//!
//! ```text
//! <Config>
//!   <add key="LogLevel" value="warn" />
//!   <add key="ApiSecret" value="s3cret" sensitive="true" editable="false" />
//! </Config>
//! ```
//!
//! `<add>` elements missing either `key` or `value` are skipped. `convert`
//! additionally writes the records out in the JSON desired-record format.

use std::path::Path;

use varsync_core::types::VariableSpec;

use crate::check_extension;
use crate::error::{format_err, io_err, SourceError};

/// Load desired records from a legacy `.config` XML file in document order.
pub fn load(path: &Path) -> Result<Vec<VariableSpec>, SourceError> {
    check_extension(path, "config")?;

    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let doc = roxmltree::Document::parse(&contents).map_err(|source| SourceError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let root = doc.root_element();
    if !root.tag_name().name().eq_ignore_ascii_case("config") {
        return Err(format_err(
            path,
            format!("root element must be <Config>, got <{}>", root.tag_name().name()),
        ));
    }

    let mut specs = Vec::new();
    for node in root.children().filter(|n| n.is_element()) {
        if node.tag_name().name() != "add" {
            continue;
        }
        let (Some(key), Some(value)) = (node.attribute("key"), node.attribute("value")) else {
            tracing::warn!(
                "{}: skipping <add> element without key/value attributes",
                path.display()
            );
            continue;
        };

        let mut spec = VariableSpec::new(key, value);
        if let Some(raw) = node.attribute("sensitive") {
            spec.is_sensitive = parse_flag(path, "sensitive", raw)?;
        }
        if let Some(raw) = node.attribute("editable") {
            spec.is_editable = parse_flag(path, "editable", raw)?;
        }
        specs.push(spec);
    }

    tracing::debug!("parsed {} record(s) from {}", specs.len(), path.display());
    Ok(specs)
}

/// Convert a legacy `.config` file to the JSON desired-record format.
///
/// Returns the parsed records. The JSON file is written atomically
/// (`.tmp` sibling + rename).
pub fn convert(xml_path: &Path, json_path: &Path) -> Result<Vec<VariableSpec>, SourceError> {
    let specs = load(xml_path)?;
    write_desired(json_path, &specs)?;
    Ok(specs)
}

fn write_desired(path: &Path, specs: &[VariableSpec]) -> Result<(), SourceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    let json = serde_json::to_string_pretty(specs).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    tracing::info!("wrote desired records to {}", path.display());
    Ok(())
}

fn parse_flag(path: &Path, attribute: &str, raw: &str) -> Result<bool, SourceError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(format_err(
            path,
            format!("attribute '{attribute}' must be 'true' or 'false', got '{other}'"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"<Config>
  <add key="LogLevel" value="warn" />
  <add key="ApiSecret" value="s3cret" sensitive="true" editable="false" />
  <add value="orphaned" />
  <other key="ignored" value="ignored" />
</Config>"#;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("app.config");
        std::fs::write(&path, content).expect("write config");
        path
    }

    #[test]
    fn parses_add_elements_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);
        let specs = load(&path).expect("load");
        assert_eq!(specs.len(), 2, "orphaned and non-add elements are skipped");
        assert_eq!(specs[0].name, "LogLevel");
        assert!(!specs[0].is_sensitive);
        assert!(specs[0].is_editable);
        assert!(specs[1].is_sensitive);
        assert!(!specs[1].is_editable);
    }

    #[test]
    fn root_element_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"<config><add key="a" value="1"/></config>"#);
        assert_eq!(load(&path).unwrap().len(), 1);
    }

    #[test]
    fn wrong_root_element_is_a_format_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"<appSettings><add key="a" value="1"/></appSettings>"#);
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("<Config>"), "got: {err}");
    }

    #[test]
    fn wrong_extension_is_a_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.xml");
        std::fs::write(&path, SAMPLE).unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, SourceError::Format { .. }), "got: {err}");
    }

    #[test]
    fn malformed_xml_is_an_xml_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "<Config><add key=broken");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, SourceError::Xml { .. }), "got: {err}");
    }

    #[test]
    fn bad_flag_attribute_is_a_format_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"<Config><add key="a" value="1" sensitive="maybe"/></Config>"#);
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("'sensitive'"), "got: {err}");
    }

    #[test]
    fn convert_writes_loadable_json() {
        let dir = TempDir::new().unwrap();
        let xml = write_config(&dir, SAMPLE);
        let json = dir.path().join("vars.json");

        let written = convert(&xml, &json).expect("convert");
        let loaded = crate::json::load(&json).expect("reload");
        assert_eq!(written, loaded);

        let tmp = json.with_extension("json.tmp");
        assert!(!tmp.exists(), ".tmp must be gone after successful convert");
    }
}
