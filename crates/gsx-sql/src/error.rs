//! Error types for gsx-sql

use std::fmt;
use thiserror::Error;

/// Which of the two schemas handed to the diff engine an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSide {
    /// The schema currently deployed
    Old,
    /// The schema requested for deployment
    New,
}

impl fmt::Display for SchemaSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSide::Old => write!(f, "old"),
            SchemaSide::New => write!(f, "new"),
        }
    }
}

/// SQL parsing and diff errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// SQL parse error (S001)
    #[error("[S001] SQL parse error: {0}")]
    ParseError(String),

    /// Empty SQL (S002)
    #[error("[S002] SQL is empty")]
    EmptySql,

    /// Unknown dialect name (S003)
    #[error("[S003] Unknown SQL dialect: {0}")]
    UnknownDialect(String),

    /// One side of a diff could not be parsed (S004)
    #[error("[S004] Failed to parse {side} schema: {source}")]
    ParseFailure {
        side: SchemaSide,
        #[source]
        source: Box<SqlError>,
    },

    /// A table is defined twice in one schema (S005)
    #[error("[S005] Table {table} is defined more than once in the {side} schema")]
    DuplicateTable { side: SchemaSide, table: String },
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
