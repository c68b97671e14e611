//! Reconciliation of a database with a schema file's history.
//!
//! One pass resolves the desired revision, reads the deployed one, and picks
//! a transition:
//!
//! - no marker table: initialize from the full schema text at the desired
//!   revision, then create and fill the marker
//! - marker equals desired: nothing to do
//! - marker differs: diff the schema at the deployed revision against the
//!   desired one, then update the marker
//!
//! Marker statements are always the last units of the plan so the recorded
//! revision only moves once the schema statements succeeded.

use crate::cancel::{check, until_cancelled};
use crate::error::{MigrateError, MigrateResult};
use crate::executor::{ExecMode, Executor};
use gsx_core::{MigrationPlan, RevisionId, SchemaSnapshot, TableName};
use gsx_db::{Database, DbError, VersionStore};
use gsx_history::{RevisionHistory, DEFAULT_REFERENCE};
use gsx_sql::{DiffEngine, DiffOptions};
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Transition a reconcile pass takes from the deployed state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The database has no marker table
    Initialize,
    /// The deployed revision is the desired one
    NoOp,
    /// The deployed revision is `from`
    Upgrade { from: RevisionId },
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Initialize => write!(f, "initialize"),
            Transition::NoOp => write!(f, "up-to-date"),
            Transition::Upgrade { from } => write!(f, "upgrade from {}", from),
        }
    }
}

/// A computed but not yet executed reconcile pass
#[derive(Debug, Clone)]
pub struct PlannedMigration {
    pub desired: RevisionId,
    pub transition: Transition,
    pub plan: MigrationPlan,
}

/// Deployed and desired revisions, without any statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub desired: RevisionId,
    /// `None` when the database was never deployed
    pub current: Option<RevisionId>,
    pub transition: Transition,
}

/// Result of a successful reconcile pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Schema created on a fresh database and the marker written
    Initialized {
        revision: RevisionId,
        statements: usize,
    },
    /// Schema moved from one revision to another
    Upgraded {
        from: RevisionId,
        to: RevisionId,
        statements: usize,
    },
    /// Nothing to do
    UpToDate { revision: RevisionId },
}

impl Outcome {
    /// The revision the database is at (or would be, for a preview)
    pub fn revision(&self) -> &RevisionId {
        match self {
            Outcome::Initialized { revision, .. } | Outcome::UpToDate { revision } => revision,
            Outcome::Upgraded { to, .. } => to,
        }
    }

    /// Number of statements written or executed
    pub fn statements(&self) -> usize {
        match self {
            Outcome::Initialized { statements, .. } | Outcome::Upgraded { statements, .. } => {
                *statements
            }
            Outcome::UpToDate { .. } => 0,
        }
    }
}

/// Brings a database to the desired revision of a schema file
pub struct Reconciler {
    history: Arc<dyn RevisionHistory>,
    db: Arc<dyn Database>,
    versions: VersionStore,
    differ: Arc<dyn DiffEngine>,
    schema_path: String,
    reference: String,
    cancel: CancellationToken,
}

impl Reconciler {
    /// Create a reconciler targeting `HEAD` with the default marker table
    pub fn new(
        history: Arc<dyn RevisionHistory>,
        db: Arc<dyn Database>,
        differ: Arc<dyn DiffEngine>,
        schema_path: impl Into<String>,
    ) -> Self {
        let versions = VersionStore::new(db.clone(), TableName::default());
        Self {
            history,
            db,
            versions,
            differ,
            schema_path: schema_path.into(),
            reference: DEFAULT_REFERENCE.to_string(),
            cancel: CancellationToken::new(),
        }
    }

    /// Use a different marker table
    pub fn with_table(mut self, table: TableName) -> Self {
        self.versions = VersionStore::new(self.db.clone(), table);
        self
    }

    /// Target the revision reachable from `reference` instead of `HEAD`
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Abort the run when `cancel` fires, dropping the pending history or
    /// database call
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn schema_path(&self) -> &str {
        &self.schema_path
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn table(&self) -> &TableName {
        self.versions.table()
    }

    /// Report where the database is and what a reconcile would do.
    pub async fn status(&self) -> MigrateResult<Status> {
        let desired = self.resolve_desired().await?;
        let current = self.read_current().await?;
        let transition = transition_for(&desired, current.as_ref());
        Ok(Status {
            desired,
            current,
            transition,
        })
    }

    /// Compute the plan for one reconcile pass without running it.
    pub async fn plan(&self) -> MigrateResult<PlannedMigration> {
        let desired = self.resolve_desired().await?;
        let current = self.read_current().await?;
        let transition = transition_for(&desired, current.as_ref());

        let plan = match &transition {
            Transition::Initialize => {
                let snapshot = self.snapshot(&desired).await?;
                let mut plan = MigrationPlan::from_raw_text(snapshot.content());
                plan.extend(self.versions.initial_statements(&desired));
                plan
            }
            Transition::NoOp => MigrationPlan::new(),
            Transition::Upgrade { from } => {
                let old = self.snapshot(from).await?;
                let new = self.snapshot(&desired).await?;
                check(&self.cancel)?;
                let statements = self
                    .differ
                    .diff(
                        old.content(),
                        new.content(),
                        DiffOptions {
                            transactional: true,
                        },
                    )
                    .map_err(MigrateError::Diff)?;
                let mut plan = MigrationPlan::from_statements(statements);
                plan.extend([self.versions.update_statement(&desired)]);
                plan
            }
        };

        log::info!(
            "Planned {} ({} statement(s)) for {} at {}",
            transition,
            plan.len(),
            self.schema_path,
            desired
        );

        Ok(PlannedMigration {
            desired,
            transition,
            plan,
        })
    }

    /// Plan and run one reconcile pass.
    ///
    /// In preview mode the statements go to `out` and the database is only
    /// read. Up to date databases produce no output.
    pub async fn reconcile<W: Write + ?Sized>(
        &self,
        mode: ExecMode,
        out: &mut W,
    ) -> MigrateResult<Outcome> {
        let PlannedMigration {
            desired,
            transition,
            plan,
        } = self.plan().await?;

        if transition == Transition::NoOp {
            log::info!("Database already at {}", desired);
            return Ok(Outcome::UpToDate { revision: desired });
        }

        let executor = Executor::new(self.db.clone(), self.cancel.clone());
        let statements = executor.run(&plan, mode, out).await?;

        Ok(match transition {
            Transition::Upgrade { from } => Outcome::Upgraded {
                from,
                to: desired,
                statements,
            },
            _ => Outcome::Initialized {
                revision: desired,
                statements,
            },
        })
    }

    async fn resolve_desired(&self) -> MigrateResult<RevisionId> {
        let desired = until_cancelled(
            &self.cancel,
            self.history.resolve(&self.reference, &self.schema_path),
        )
        .await?
        .map_err(MigrateError::Resolve)?;
        log::debug!(
            "Resolved {} for {} via {}: {}",
            self.reference,
            self.schema_path,
            self.history.history_type(),
            desired
        );
        Ok(desired)
    }

    /// The deployed revision, or `None` when the marker table is absent
    async fn read_current(&self) -> MigrateResult<Option<RevisionId>> {
        match until_cancelled(&self.cancel, self.versions.read_current()).await? {
            Ok(current) => {
                log::debug!("Deployed revision: {}", current);
                Ok(Some(current))
            }
            Err(DbError::NotInitialized { table }) => {
                log::debug!("Version table {} not found", table);
                Ok(None)
            }
            Err(e) => Err(MigrateError::ReadVersion(e)),
        }
    }

    async fn snapshot(&self, revision: &RevisionId) -> MigrateResult<SchemaSnapshot> {
        let snapshot = until_cancelled(
            &self.cancel,
            self.history.snapshot(revision, &self.schema_path),
        )
        .await?
        .map_err(|source| MigrateError::Snapshot {
            revision: revision.to_string(),
            source,
        })?;
        log::debug!(
            "Read {} at {} ({} bytes)",
            snapshot.path(),
            snapshot.revision(),
            snapshot.content().len()
        );
        Ok(snapshot)
    }
}

fn transition_for(desired: &RevisionId, current: Option<&RevisionId>) -> Transition {
    match current {
        None => Transition::Initialize,
        Some(current) if current == desired => Transition::NoOp,
        Some(current) => Transition::Upgrade {
            from: current.clone(),
        },
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
