use super::*;
use std::str::FromStr;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let yaml = r#"
schema: schema.sql
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.schema.as_deref(), Some("schema.sql"));
    assert_eq!(config.table, "git_schemalex_version");
    assert_eq!(config.dialect, Dialect::DuckDb);
    assert_eq!(config.database.path, ":memory:");
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
schema: db/schema.sql
table: schema_version
dialect: mysql
database:
  path: ./dev.duckdb
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.schema_path().unwrap(), "db/schema.sql");
    assert_eq!(config.table, "schema_version");
    assert_eq!(config.dialect, Dialect::MySql);
    assert_eq!(config.database.path, "./dev.duckdb");
    config.validate().unwrap();
}

#[test]
fn test_unknown_field_rejected() {
    let yaml = r#"
schema: schema.sql
deploy: true
"#;
    let result: Result<Config, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}

#[test]
fn test_empty_table_rejected() {
    let yaml = r#"
table: ""
"#;
    let result: Result<Config, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}

#[test]
fn test_absolute_schema_path_invalid() {
    let config = Config {
        schema: Some("/etc/schema.sql".to_string()),
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_missing_schema_path() {
    let config = Config::default();
    assert!(matches!(
        config.schema_path(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_load_from_dir_without_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert!(config.schema.is_none());
    assert_eq!(config.table, "git_schemalex_version");
}

#[test]
fn test_load_from_dir_reads_yml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("gsx.yml"), "schema: schema.sql\ntable: v\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.schema.as_deref(), Some("schema.sql"));
    assert_eq!(config.table, "v");
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Config::load(&dir.path().join("nope.yml"));
    assert!(matches!(result, Err(CoreError::ConfigNotFound { .. })));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gsx.yml");
    std::fs::write(&path, "schema: [unclosed").unwrap();
    assert!(matches!(
        Config::load(&path),
        Err(CoreError::ConfigParseError { .. })
    ));
}

#[test]
fn test_dialect_from_str() {
    assert_eq!(Dialect::from_str("DuckDB").unwrap(), Dialect::DuckDb);
    assert_eq!(Dialect::from_str("mysql").unwrap(), Dialect::MySql);
    assert_eq!(Dialect::from_str("generic").unwrap(), Dialect::Generic);
    assert!(Dialect::from_str("oracle").is_err());
    assert_eq!(Dialect::MySql.to_string(), "mysql");
}

#[test]
fn test_in_memory_database() {
    assert!(DatabaseConfig::default().is_in_memory());
    let file = DatabaseConfig {
        path: "dev.duckdb".to_string(),
    };
    assert!(!file.is_in_memory());
}
