//! Error types for gsx-migrate

use gsx_db::DbError;
use gsx_history::HistoryError;
use gsx_sql::SqlError;
use thiserror::Error;

/// Reconciliation errors, tagged with the step that failed
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The desired revision could not be resolved (R001)
    #[error("[R001] Failed to resolve the desired schema revision")]
    Resolve(#[source] HistoryError),

    /// The schema file could not be read at a revision (R002)
    #[error("[R002] Failed to read the schema at revision {revision}")]
    Snapshot {
        revision: String,
        #[source]
        source: HistoryError,
    },

    /// The deployed revision could not be read (R003)
    #[error("[R003] Failed to read the deployed schema version")]
    ReadVersion(#[source] DbError),

    /// The diff engine rejected one of the schemas (R004)
    #[error("[R004] Failed to compute the schema diff")]
    Diff(#[source] SqlError),

    /// A statement failed during apply; `index` is 1-based (R005)
    #[error("[R005] Statement {index} failed")]
    StatementFailure {
        index: usize,
        #[source]
        cause: DbError,
    },

    /// Writing preview output failed; `index` is 1-based (R006)
    #[error("[R006] Failed to write statement {index}")]
    OutputFailure {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    /// The run was cancelled before completion (R007)
    #[error("[R007] Reconciliation cancelled")]
    Cancelled,
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
