//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute one statement synchronously.
    ///
    /// Statements without parameters go through `execute_batch`, which also
    /// accepts transaction control (`BEGIN TRANSACTION`, `COMMIT`).
    fn execute_sync(&self, sql: &str, params: &[String]) -> DbResult<usize> {
        let conn = self.lock()?;
        if params.is_empty() {
            conn.execute_batch(sql).map_err(|e| with_sql(e, sql))?;
            return Ok(0);
        }
        conn.execute(sql, duckdb::params_from_iter(params.iter()))
            .map_err(|e| with_sql(e, sql))
    }

    /// Query a single text value synchronously
    fn query_one_text_sync(&self, sql: &str) -> DbResult<Option<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql).map_err(|e| with_sql(e, sql))?;
        let mut rows = stmt.query([]).map_err(|e| with_sql(e, sql))?;
        match rows.next().map_err(|e| with_sql(e, sql))? {
            Some(row) => {
                let value: String = row.get(0).map_err(|e| with_sql(e, sql))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

/// Classify a driver error, keeping the failing statement in the message
fn with_sql(err: duckdb::Error, sql: &str) -> DbError {
    match DbError::from(err) {
        DbError::ExecutionError(msg) => DbError::ExecutionError(format!("{}: {}", msg, sql)),
        other => other,
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str, params: &[String]) -> DbResult<usize> {
        self.execute_sync(sql, params)
    }

    async fn query_one_text(&self, sql: &str) -> DbResult<Option<String>> {
        self.query_one_text_sync(sql)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
