//! Settings error-message and file-handling integration tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use varsync_core::{Settings, SettingsError};

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_settings_reports_io_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join("varsync.json");
    let err = Settings::load_at(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Io { .. }), "got: {err}");
    assert!(err.to_string().contains("varsync.json"));
}

#[test]
fn load_corrupt_json_reports_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("varsync.json");
    file.write_str("{\"serverUrl\": \"http://store.local\", !!!").expect("write");

    let err = Settings::load_at(file.path()).unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("varsync.json"), "must contain file path, got: {msg}");
    let source_msg = match &err {
        SettingsError::Parse { source, .. } => source.to_string(),
        _ => unreachable!(),
    };
    assert!(!source_msg.is_empty(), "serde_json must provide error context");
}

#[test]
fn load_wrong_shape_json_reports_parse_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("varsync.json");
    file.write_str("[\"a list, not an object\"]").expect("write");

    let err = Settings::load_at(file.path()).unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Validation messages
// ---------------------------------------------------------------------------

#[test]
fn missing_required_field_names_the_field_and_file() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("varsync.json");
    file.write_str(
        r#"{
            "serverUrl": "http://store.local",
            "projectName": "",
            "environment": "production",
            "variablesFileFormat": "csv",
            "variablesFilePath": "vars.csv"
        }"#,
    )
    .expect("write");

    let err = Settings::load_at(file.path()).unwrap_err();
    assert!(matches!(err, SettingsError::Missing { field: "projectName", .. }), "got: {err}");
    assert!(err.to_string().contains("varsync.json"));
}

// ---------------------------------------------------------------------------
// 3. Happy path leaves the file untouched
// ---------------------------------------------------------------------------

#[test]
fn load_does_not_modify_the_settings_file() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("varsync.json");
    let content = r#"{
        "serverUrl": "http://store.local",
        "projectName": "payments",
        "environment": "production",
        "variablesFileFormat": "json",
        "variablesFilePath": "vars.json"
    }"#;
    file.write_str(content).expect("write");

    let settings = Settings::load_at(file.path()).expect("load");
    assert_eq!(settings.environment, "production");
    file.assert(predicate::str::contains("\"projectName\": \"payments\""));
}
