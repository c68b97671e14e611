//! Revision identifiers, schema snapshots, and the marker table name.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Stable identifier for one point in the schema history (a full commit hash).
    ///
    /// Two revisions are equal iff they denote the same point. Ordering between
    /// revisions is defined by the history, not by the identifier, so no `Ord`
    /// impl is provided.
    pub struct RevisionId;
}

define_newtype_string! {
    /// Name of the bookkeeping table that holds the deployed revision.
    ///
    /// Operator-trusted: it is interpolated into SQL without escaping.
    pub struct TableName;
}

/// Default marker table name.
pub const DEFAULT_TABLE_NAME: &str = "git_schemalex_version";

impl Default for TableName {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_NAME)
    }
}

impl TableName {
    /// Render the name as a double-quoted SQL identifier.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.as_str())
    }
}

/// Full text of the schema file as of one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSnapshot {
    revision: RevisionId,
    path: String,
    content: String,
}

impl SchemaSnapshot {
    pub fn new(revision: RevisionId, path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            revision,
            path: path.into(),
            content: content.into(),
        }
    }

    /// Revision this snapshot was read at
    pub fn revision(&self) -> &RevisionId {
        &self.revision
    }

    /// Path of the schema file within the workspace
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw DDL text
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
#[path = "revision_test.rs"]
mod tests;
