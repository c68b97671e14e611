use super::*;

#[test]
fn test_revision_equality_is_by_value() {
    let a = RevisionId::new("3f2a9c1");
    let b = RevisionId::new(String::from("3f2a9c1"));
    assert_eq!(a, b);
    assert_ne!(a, RevisionId::new("8d01e44"));
    assert_eq!(a, "3f2a9c1");
}

#[test]
fn test_revision_rejects_empty() {
    assert!(RevisionId::try_new("").is_none());
    assert!(RevisionId::try_from("").is_err());
}

#[test]
fn test_revision_deserialize_rejects_empty() {
    let result: Result<RevisionId, _> = serde_yaml::from_str("''");
    assert!(result.is_err());
}

#[test]
fn test_default_table_name() {
    let table = TableName::default();
    assert_eq!(table, "git_schemalex_version");
    assert_eq!(table.quoted(), "\"git_schemalex_version\"");
}

#[test]
fn test_snapshot_accessors() {
    let snapshot = SchemaSnapshot::new(
        RevisionId::new("abc123"),
        "db/schema.sql",
        "CREATE TABLE a (id INT);",
    );
    assert_eq!(snapshot.revision(), &RevisionId::new("abc123"));
    assert_eq!(snapshot.path(), "db/schema.sql");
    assert_eq!(snapshot.content(), "CREATE TABLE a (id INT);");
}
