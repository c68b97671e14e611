//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Database abstraction trait for gsx
///
/// Implementations must be Send + Sync for async operation. Every call is a
/// single blocking round trip; there is no implicit transaction.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one statement with positional text parameters, returns
    /// affected rows (0 for statements that do not report a count)
    async fn execute(&self, sql: &str, params: &[String]) -> DbResult<usize>;

    /// Return the first column of the first row as text, `None` when the
    /// query returns no rows
    async fn query_one_text(&self, sql: &str) -> DbResult<Option<String>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
