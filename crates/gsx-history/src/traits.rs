//! Revision history trait definition

use crate::error::HistoryResult;
use async_trait::async_trait;
use gsx_core::{RevisionId, SchemaSnapshot};

/// Reference resolved when no explicit revision is requested
pub const DEFAULT_REFERENCE: &str = "HEAD";

/// Read-only access to the history the schema file is tracked in.
///
/// Implementations never cache: every call reflects the history as it is at
/// call time.
#[async_trait]
pub trait RevisionHistory: Send + Sync {
    /// Resolve `reference` to the most recent revision reachable from it that
    /// touched `path`.
    async fn resolve(&self, reference: &str, path: &str) -> HistoryResult<RevisionId>;

    /// Read the content of `path` exactly as it was at `revision`.
    async fn snapshot(&self, revision: &RevisionId, path: &str) -> HistoryResult<SchemaSnapshot>;

    /// History backend identifier for logging
    fn history_type(&self) -> &'static str;
}
