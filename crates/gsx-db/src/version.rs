//! Version marker bookkeeping.
//!
//! The deployed revision lives in a one-column, one-row table inside the
//! target database. Reading goes straight to the database; writing is
//! expressed as statements so the orchestrator can append them as the last
//! units of a migration plan and the marker only moves when everything before
//! it succeeded.
//!
//! The table name is interpolated into SQL (double-quoted, not escaped) and
//! must come from the operator, never from end-user input.

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use gsx_core::{RevisionId, StatementUnit, TableName};
use std::sync::Arc;

/// Reads the deployed revision and builds the statements that record one
pub struct VersionStore {
    db: Arc<dyn Database>,
    table: TableName,
}

impl VersionStore {
    pub fn new(db: Arc<dyn Database>, table: TableName) -> Self {
        Self { db, table }
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Read the revision recorded by the last successful deploy.
    ///
    /// A missing table is reported as [`DbError::NotInitialized`]; a table
    /// without a usable row as [`DbError::MarkerMissing`].
    pub async fn read_current(&self) -> DbResult<RevisionId> {
        let sql = format!("SELECT version FROM {}", self.table.quoted());
        log::debug!("Reading version marker: {}", sql);

        match self.db.query_one_text(&sql).await {
            Err(DbError::TableNotFound(_)) => Err(DbError::NotInitialized {
                table: self.table.to_string(),
            }),
            Err(e) => Err(e),
            Ok(value) => value
                .and_then(|v| RevisionId::try_new(v.trim()))
                .ok_or_else(|| DbError::MarkerMissing {
                    table: self.table.to_string(),
                }),
        }
    }

    /// Statements creating the marker table and inserting its single row.
    pub fn initial_statements(&self, revision: &RevisionId) -> Vec<StatementUnit> {
        let table = self.table.quoted();
        vec![
            StatementUnit::new(format!(
                "CREATE TABLE {} ( version VARCHAR(40) NOT NULL )",
                table
            )),
            StatementUnit::with_params(
                format!("INSERT INTO {} (version) VALUES (?)", table),
                vec![revision.to_string()],
            ),
        ]
    }

    /// Statement overwriting the marker row.
    pub fn update_statement(&self, revision: &RevisionId) -> StatementUnit {
        StatementUnit::with_params(
            format!("UPDATE {} SET version = ?", self.table.quoted()),
            vec![revision.to_string()],
        )
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
