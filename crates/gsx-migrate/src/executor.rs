//! Plan execution.
//!
//! A plan is either previewed (rendered to a writer, database untouched) or
//! applied (executed in order, stopping at the first failure).

use crate::cancel::{check, until_cancelled};
use crate::error::{MigrateError, MigrateResult};
use gsx_core::MigrationPlan;
use gsx_db::Database;
use std::io::Write;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// How a plan is run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Write the statements out without touching the database
    Preview,
    /// Execute the statements against the database
    Apply,
}

/// Runs migration plans against one database
pub struct Executor {
    db: Arc<dyn Database>,
    cancel: CancellationToken,
}

impl Executor {
    pub fn new(db: Arc<dyn Database>, cancel: CancellationToken) -> Self {
        Self { db, cancel }
    }

    /// Run `plan` in `mode` and return the number of statements handled.
    ///
    /// Preview writes each unit followed by a blank line to `out`. Apply
    /// leaves `out` alone. Statements already executed when a later one
    /// fails are not undone.
    pub async fn run<W: Write + ?Sized>(
        &self,
        plan: &MigrationPlan,
        mode: ExecMode,
        out: &mut W,
    ) -> MigrateResult<usize> {
        match mode {
            ExecMode::Preview => self.preview(plan, out),
            ExecMode::Apply => self.apply(plan).await,
        }
    }

    fn preview<W: Write + ?Sized>(&self, plan: &MigrationPlan, out: &mut W) -> MigrateResult<usize> {
        for (i, unit) in plan.iter().enumerate() {
            check(&self.cancel)?;
            writeln!(out, "{}\n", unit).map_err(|source| MigrateError::OutputFailure {
                index: i + 1,
                source,
            })?;
        }
        out.flush().map_err(|source| MigrateError::OutputFailure {
            index: plan.len(),
            source,
        })?;
        Ok(plan.len())
    }

    async fn apply(&self, plan: &MigrationPlan) -> MigrateResult<usize> {
        for (i, unit) in plan.iter().enumerate() {
            log::debug!("Executing statement {}/{}: {}", i + 1, plan.len(), unit);
            until_cancelled(&self.cancel, self.db.execute(&unit.sql, &unit.params))
                .await?
                .map_err(|cause| MigrateError::StatementFailure {
                    index: i + 1,
                    cause,
                })?;
        }
        log::debug!("Executed {} statement(s) on {}", plan.len(), self.db.db_type());
        Ok(plan.len())
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
