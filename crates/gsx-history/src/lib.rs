//! gsx-history - Revision history access for gsx
//!
//! This crate provides the `RevisionHistory` trait, which resolves symbolic
//! references to stable revision identifiers and reads the schema file as it
//! existed at a revision, plus a git implementation driven through the `git`
//! binary.

pub mod error;
pub mod git;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod traits;

pub use error::{HistoryError, HistoryResult};
pub use git::GitHistory;
pub use traits::{RevisionHistory, DEFAULT_REFERENCE};
