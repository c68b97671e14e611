//! gsx-migrate - Schema reconciliation
//!
//! Compares the revision recorded in the target database with the desired
//! revision of the schema file and runs the statements that close the gap:
//! the whole schema on a fresh database, a diff on an outdated one, nothing
//! when both agree.

mod cancel;
pub mod error;
pub mod executor;
pub mod orchestrator;

pub use error::{MigrateError, MigrateResult};
pub use executor::{ExecMode, Executor};
pub use orchestrator::{Outcome, PlannedMigration, Reconciler, Status, Transition};
