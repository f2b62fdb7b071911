//! `--import` end-to-end against a mock variable store.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PROJECTS: &str =
    r#"[{"Id": "projects-1", "Name": "payments", "VariableSetId": "variableset-1"}]"#;

const EMPTY_SET: &str = r#"{
    "Id": "variableset-1",
    "OwnerId": "projects-1",
    "Version": 1,
    "Variables": [],
    "ScopeValues": {"Environments": [
        {"Id": "env-1", "Name": "production"},
        {"Id": "env-2", "Name": "staging"}
    ]}
}"#;

const COMMITTED_SET: &str = r#"{
    "Id": "variableset-1",
    "OwnerId": "projects-1",
    "Version": 2,
    "Variables": [
        {"Name": "X", "Value": "1", "IsSensitive": false, "IsEditable": true,
         "Scope": {"Environment": ["env-1"]}}
    ],
    "ScopeValues": {"Environments": [
        {"Id": "env-1", "Name": "production"},
        {"Id": "env-2", "Name": "staging"}
    ]}
}"#;

fn write_workspace(dir: &TempDir, server_url: &str, environment: &str) {
    std::fs::write(dir.path().join("vars.json"), r#"[{"Name": "X", "Value": "1"}]"#).unwrap();
    let settings = serde_json::json!({
        "serverUrl": server_url,
        "apiKey": "API-123",
        "projectName": "payments",
        "environment": environment,
        "variablesFileFormat": "json",
        "variablesFilePath": "vars.json"
    });
    std::fs::write(dir.path().join("varsync.json"), settings.to_string()).unwrap();
}

fn varsync(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("varsync").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn import_reconciles_and_commits() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/api/projects/all").with_body(PROJECTS).create();
    server
        .mock("GET", "/api/variables/variableset-1")
        .with_body(EMPTY_SET)
        .create();
    let put = server
        .mock("PUT", "/api/variables/variableset-1")
        .match_header("x-apikey", "API-123")
        .with_body(COMMITTED_SET)
        .expect(1)
        .create();

    let dir = TempDir::new().unwrap();
    write_workspace(&dir, &server.url(), "production");

    varsync(&dir)
        .args(["--import", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Committed 1 change(s)"));
    put.assert();
}

#[test]
fn dry_run_reports_but_never_commits() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/api/projects/all").with_body(PROJECTS).create();
    server
        .mock("GET", "/api/variables/variableset-1")
        .with_body(EMPTY_SET)
        .create();
    let put = server
        .mock("PUT", "/api/variables/variableset-1")
        .expect(0)
        .create();

    let dir = TempDir::new().unwrap();
    write_workspace(&dir, &server.url(), "production");

    varsync(&dir)
        .args(["--import", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] no changes committed"));
    put.assert();
}

#[test]
fn unknown_environment_fails_before_any_write() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/api/projects/all").with_body(PROJECTS).create();
    server
        .mock("GET", "/api/variables/variableset-1")
        .with_body(EMPTY_SET)
        .create();
    let put = server
        .mock("PUT", "/api/variables/variableset-1")
        .expect(0)
        .create();

    let dir = TempDir::new().unwrap();
    write_workspace(&dir, &server.url(), "qa");

    varsync(&dir)
        .args(["--import", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'qa'"));
    put.assert();
}

#[test]
fn source_format_error_aborts_before_remote_contact() {
    let mut server = mockito::Server::new();
    let projects = server
        .mock("GET", "/api/projects/all")
        .with_body(PROJECTS)
        .expect(0)
        .create();

    let dir = TempDir::new().unwrap();
    // Declared format json, but the file on disk is CSV-shaped and -named.
    std::fs::write(dir.path().join("vars.csv"), "X;1\n").unwrap();
    let settings = serde_json::json!({
        "serverUrl": server.url(),
        "projectName": "payments",
        "environment": "production",
        "variablesFileFormat": "json",
        "variablesFilePath": "vars.csv"
    });
    std::fs::write(dir.path().join("varsync.json"), settings.to_string()).unwrap();

    varsync(&dir)
        .args(["--import", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("declared format"));
    projects.assert();
}

#[test]
fn access_denied_is_reported_and_fatal() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/projects/all")
        .with_status(403)
        .with_body("key lacks project access")
        .create();

    let dir = TempDir::new().unwrap();
    write_workspace(&dir, &server.url(), "production");

    varsync(&dir)
        .args(["--import", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("access denied"));
}
