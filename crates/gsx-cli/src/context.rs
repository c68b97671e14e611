//! Runtime context for CLI commands

use anyhow::{Context, Result};
use gsx_core::{Config, CoreError, Dialect, TableName};
use gsx_db::{Database, DuckDbBackend};
use gsx_history::GitHistory;
use gsx_migrate::Reconciler;
use gsx_sql::SchemaDiffer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::cli::{GlobalArgs, TargetArgs};

/// Configuration merged from gsx.yml and command-line overrides
#[derive(Debug)]
pub struct RuntimeContext {
    /// Git working directory
    pub workspace: PathBuf,

    /// Effective configuration
    pub config: Config,

    /// Revision the schema is taken from
    pub commit: String,
}

impl RuntimeContext {
    /// Load the workspace config and apply command-line overrides
    pub fn new(global: &GlobalArgs, target: &TargetArgs) -> Result<Self> {
        let workspace = PathBuf::from(&global.workspace);

        let mut config = match &global.config {
            Some(path) => Config::load(Path::new(path)).context("Failed to load configuration file")?,
            None => Config::load_from_dir(&workspace)
                .context("Failed to load workspace configuration")?,
        };
        apply_overrides(&mut config, target)?;
        config.validate().context("Invalid configuration")?;

        log::debug!(
            "Workspace {}: schema={:?} table={} dialect={} database={}",
            workspace.display(),
            config.schema,
            config.table,
            config.dialect,
            config.database.path
        );

        Ok(Self {
            workspace,
            config,
            commit: target.commit.clone(),
        })
    }

    /// Fail unless the database outlives this process
    pub fn require_persistent_database(&self) -> Result<()> {
        if self.config.database.is_in_memory() {
            return Err(CoreError::ConfigInvalid {
                message: "deploying to an in-memory database persists nothing; pass --dsn <file> or set database.path in gsx.yml".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Open the target database
    pub fn connect(&self) -> Result<Arc<dyn Database>> {
        let db = DuckDbBackend::new(&self.config.database.path).with_context(|| {
            format!(
                "Failed to connect to database: {}",
                self.config.database.path
            )
        })?;
        Ok(Arc::new(db))
    }

    /// Build a reconciler for the configured schema, database, and commit
    pub fn reconciler(&self, cancel: CancellationToken) -> Result<Reconciler> {
        let schema = self.config.schema_path()?;
        let differ = SchemaDiffer::from_dialect_name(&self.config.dialect.to_string())
            .context("Failed to create schema differ")?;

        Ok(Reconciler::new(
            Arc::new(GitHistory::new(self.workspace.clone())),
            self.connect()?,
            Arc::new(differ),
            schema,
        )
        .with_table(self.config.table.clone())
        .with_reference(self.commit.clone())
        .with_cancellation(cancel))
    }
}

fn apply_overrides(config: &mut Config, target: &TargetArgs) -> Result<()> {
    if let Some(schema) = &target.schema {
        config.schema = Some(schema.clone());
    }
    if let Some(table) = &target.table {
        config.table = TableName::try_new(table.clone())
            .context("Marker table name cannot be empty")?;
    }
    if let Some(dialect) = &target.dialect {
        config.dialect = dialect.parse::<Dialect>()?;
    }
    if let Some(dsn) = &target.dsn {
        config.database.path = dsn.clone();
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
