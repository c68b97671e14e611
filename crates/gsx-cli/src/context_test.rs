use super::*;
use std::fs;
use tempfile::TempDir;

fn global(dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        workspace: dir.display().to_string(),
        config: None,
    }
}

fn target() -> TargetArgs {
    TargetArgs {
        commit: "HEAD".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_defaults_without_config_file() {
    let dir = TempDir::new().unwrap();
    let ctx = RuntimeContext::new(&global(dir.path()), &target()).unwrap();
    assert_eq!(ctx.config.table.as_str(), "git_schemalex_version");
    assert_eq!(ctx.config.database.path, ":memory:");
    assert_eq!(ctx.config.dialect, Dialect::DuckDb);
    assert!(ctx.config.schema.is_none());
    assert_eq!(ctx.commit, "HEAD");
}

#[test]
fn test_reconciler_requires_schema() {
    let dir = TempDir::new().unwrap();
    let ctx = RuntimeContext::new(&global(dir.path()), &target()).unwrap();
    let err = ctx.reconciler(CancellationToken::new()).err().unwrap();
    assert!(err.to_string().contains("no schema file configured"));
}

#[test]
fn test_config_file_then_overrides() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gsx.yml"),
        "schema: schema.sql\ntable: marker\ndialect: mysql\ndatabase:\n  path: dev.duckdb\n",
    )
    .unwrap();

    let ctx = RuntimeContext::new(&global(dir.path()), &target()).unwrap();
    assert_eq!(ctx.config.schema.as_deref(), Some("schema.sql"));
    assert_eq!(ctx.config.table.as_str(), "marker");
    assert_eq!(ctx.config.dialect, Dialect::MySql);

    let overrides = TargetArgs {
        dsn: Some(":memory:".to_string()),
        table: Some("other_marker".to_string()),
        schema: Some("db/schema.sql".to_string()),
        dialect: Some("generic".to_string()),
        commit: "abc123".to_string(),
    };
    let ctx = RuntimeContext::new(&global(dir.path()), &overrides).unwrap();
    assert_eq!(ctx.config.schema.as_deref(), Some("db/schema.sql"));
    assert_eq!(ctx.config.table.as_str(), "other_marker");
    assert_eq!(ctx.config.dialect, Dialect::Generic);
    assert_eq!(ctx.config.database.path, ":memory:");
    assert_eq!(ctx.commit, "abc123");

    let reconciler = ctx.reconciler(CancellationToken::new()).unwrap();
    assert_eq!(reconciler.schema_path(), "db/schema.sql");
    assert_eq!(reconciler.reference(), "abc123");
}

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.yml");
    fs::write(&path, "schema: schema.sql\n").unwrap();

    let mut args = global(dir.path());
    args.config = Some(path.display().to_string());
    let ctx = RuntimeContext::new(&args, &target()).unwrap();
    assert_eq!(ctx.config.schema.as_deref(), Some("schema.sql"));

    args.config = Some(dir.path().join("missing.yml").display().to_string());
    assert!(RuntimeContext::new(&args, &target()).is_err());
}

#[test]
fn test_invalid_overrides_rejected() {
    let dir = TempDir::new().unwrap();

    let bad_dialect = TargetArgs {
        dialect: Some("oracle".to_string()),
        ..target()
    };
    assert!(RuntimeContext::new(&global(dir.path()), &bad_dialect).is_err());

    let empty_table = TargetArgs {
        table: Some(String::new()),
        ..target()
    };
    assert!(RuntimeContext::new(&global(dir.path()), &empty_table).is_err());

    let absolute_schema = TargetArgs {
        schema: Some("/etc/schema.sql".to_string()),
        ..target()
    };
    assert!(RuntimeContext::new(&global(dir.path()), &absolute_schema).is_err());
}

#[test]
fn test_persistent_database_required() {
    let dir = TempDir::new().unwrap();
    let ctx = RuntimeContext::new(&global(dir.path()), &target()).unwrap();
    let err = ctx.require_persistent_database().unwrap_err();
    assert!(err.to_string().contains("in-memory"));

    let file = TargetArgs {
        dsn: Some(dir.path().join("dev.duckdb").display().to_string()),
        ..target()
    };
    let ctx = RuntimeContext::new(&global(dir.path()), &file).unwrap();
    assert!(ctx.require_persistent_database().is_ok());
}
