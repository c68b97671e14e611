//! Integration tests for the gsx binary

use gsx_history::test_utils::GitRepo;
use std::path::Path;
use std::process::{Command, Output};

const HOGE: &str = "CREATE TABLE hoge (id INT NOT NULL, c VARCHAR(20));\n";
const FUGA: &str = "CREATE TABLE fuga (id INT NOT NULL, c VARCHAR(20));\n";

fn gsx(workspace: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gsx"))
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .env_remove("GSX_DSN")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn dsn(dir: &tempfile::TempDir) -> String {
    dir.path().join("deploy.duckdb").display().to_string()
}

#[test]
fn test_preview_then_deploy_then_noop() {
    let Some(repo) = GitRepo::init() else { return };
    let rev = repo.commit_file("schema.sql", HOGE, "hoge");
    let db_dir = tempfile::TempDir::new().unwrap();
    let dsn = dsn(&db_dir);
    let target = ["--schema", "schema.sql", "--dsn", dsn.as_str()];

    let mut args = vec!["deploy"];
    args.extend(target);
    let preview = gsx(repo.path(), &args);
    assert!(preview.status.success(), "stderr: {}", stderr(&preview));
    let text = stdout(&preview);
    assert!(text.contains("CREATE TABLE hoge (id INT NOT NULL, c VARCHAR(20));"));
    assert!(text.contains("CREATE TABLE \"git_schemalex_version\""));
    assert!(text.contains(&format!("-- [{}]", rev)));

    args.push("--deploy");
    let applied = gsx(repo.path(), &args);
    assert!(applied.status.success(), "stderr: {}", stderr(&applied));
    assert!(stdout(&applied).contains(&format!("Initialized git_schemalex_version at {}", rev)));

    let again = gsx(repo.path(), &args);
    assert!(again.status.success(), "stderr: {}", stderr(&again));
    assert_eq!(
        stdout(&again).trim(),
        format!("db version is equal to schema version ({})", rev)
    );
}

#[test]
fn test_upgrade_with_config_file() {
    let Some(repo) = GitRepo::init() else { return };
    let db_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        repo.path().join("gsx.yml"),
        format!("schema: schema.sql\ndatabase:\n  path: {}\n", dsn(&db_dir)),
    )
    .unwrap();
    let first = repo.commit_file("schema.sql", HOGE, "hoge");

    let applied = gsx(repo.path(), &["deploy", "--deploy"]);
    assert!(applied.status.success(), "stderr: {}", stderr(&applied));

    let second = repo.append_file("schema.sql", FUGA, "fuga");
    let status = gsx(repo.path(), &["status", "--output", "json"]);
    assert!(status.status.success(), "stderr: {}", stderr(&status));
    let json: serde_json::Value = serde_json::from_str(&stdout(&status)).unwrap();
    assert_eq!(json["current"], first.as_str());
    assert_eq!(json["desired"], second.as_str());
    assert_eq!(json["action"], "upgrade");

    let upgraded = gsx(repo.path(), &["deploy", "--deploy"]);
    assert!(upgraded.status.success(), "stderr: {}", stderr(&upgraded));
    assert!(stdout(&upgraded).contains(&format!("Upgraded {} -> {}", first, second)));

    let status = gsx(repo.path(), &["status"]);
    assert!(stdout(&status).contains("db version is equal to schema version"));
}

#[test]
fn test_missing_schema_fails() {
    let Some(repo) = GitRepo::init() else { return };
    repo.commit_file("README.md", "docs\n", "docs");

    let output = gsx(repo.path(), &["deploy"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no schema file configured"));

    let output = gsx(repo.path(), &["deploy", "--schema", "schema.sql"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("R001"), "stderr: {}", stderr(&output));
}

#[test]
fn test_invalid_dialect_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = gsx(
        dir.path(),
        &["deploy", "--schema", "schema.sql", "--dialect", "oracle"],
    );
    assert!(!output.status.success());
}

#[test]
fn test_deploy_to_in_memory_database_rejected() {
    let Some(repo) = GitRepo::init() else { return };
    repo.commit_file("schema.sql", HOGE, "hoge");

    let output = gsx(repo.path(), &["deploy", "--deploy", "--schema", "schema.sql"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("in-memory"), "stderr: {}", stderr(&output));
    assert!(!stdout(&output).contains("Initialized"));

    let preview = gsx(repo.path(), &["deploy", "--schema", "schema.sql"]);
    assert!(preview.status.success(), "stderr: {}", stderr(&preview));
    assert!(stdout(&preview).contains("CREATE TABLE hoge"));
}
