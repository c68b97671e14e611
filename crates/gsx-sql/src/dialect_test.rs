use super::*;

#[test]
fn test_duckdb_parse() {
    let dialect = DuckDbDialect::new();
    let stmts = dialect.parse("CREATE TABLE users (id INT)").unwrap();
    assert_eq!(stmts.len(), 1);
    assert_eq!(dialect.name(), "duckdb");
}

#[test]
fn test_mysql_parses_backticks() {
    let dialect = MySqlDialect::new();
    let stmts = dialect
        .parse("CREATE TABLE hoge ( `id` INTEGER NOT NULL, `c` VARCHAR(20) )")
        .unwrap();
    assert_eq!(stmts.len(), 1);
}

#[test]
fn test_whole_column_rewrite() {
    assert!(MySqlDialect::new().rewrites_whole_column());
    assert!(!DuckDbDialect::new().rewrites_whole_column());
    assert!(!GenericDialect::new().rewrites_whole_column());
}

#[test]
fn test_parse_error_keeps_parser_message() {
    let result = GenericDialect::new().parse("CREATE TABLE (");
    match result {
        Err(SqlError::ParseError(message)) => assert!(!message.is_empty()),
        other => panic!("expected ParseError, got {:?}", other),
    }
}
