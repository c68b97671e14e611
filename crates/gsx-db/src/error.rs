//! Error types for gsx-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// Mutex poisoned (D004)
    #[error("[D004] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// The marker table does not exist: the database was never deployed (D005)
    #[error("[D005] Version table {table} does not exist")]
    NotInitialized { table: String },

    /// The marker table exists but holds no usable version (D006)
    #[error("[D006] Version table {table} exists but contains no version")]
    MarkerMissing { table: String },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured variants, so missing tables
        // are recognised by message. Patterns are kept narrow so function,
        // type, and schema errors stay ExecutionError, and so does "already
        // exists".
        let msg = err.to_string();
        let names_relation = msg.contains("Table with name")
            || msg.contains("View with name")
            || msg.contains("Table or view with name");
        if (names_relation && msg.contains("does not exist"))
            || (msg.contains("Catalog Error") && msg.contains("Table") && msg.contains("not found"))
        {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
