//! Error types for gsx-history

use thiserror::Error;

/// Revision history errors
#[derive(Error, Debug)]
pub enum HistoryError {
    /// History store unreachable or reference invalid (H001)
    #[error("[H001] Failed to resolve '{reference}': {message}")]
    Resolution { reference: String, message: String },

    /// Path absent at the given revision (H002)
    #[error("[H002] '{path}' not found at revision {revision}")]
    NotFound { revision: String, path: String },

    /// The history tool could not be started (H003)
    #[error("[H003] Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot content is not text (H004)
    #[error("[H004] '{path}' at revision {revision} is not valid UTF-8")]
    InvalidUtf8 { revision: String, path: String },
}

/// Result type alias for HistoryError
pub type HistoryResult<T> = Result<T, HistoryError>;
