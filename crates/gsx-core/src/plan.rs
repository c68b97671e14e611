//! Statement plans: the ordered unit of work handed to the executor.
//!
//! A [`MigrationPlan`] is built once per reconciliation pass, either by
//! splitting raw schema text or by wrapping statements produced by a diff
//! engine, and then has its bookkeeping statements appended at the tail.
//! Nothing here reorders statements.

use std::fmt;

/// Statement separator used when splitting raw schema text.
const STATEMENT_SEPARATOR: char = ';';

/// One SQL statement plus its positional bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementUnit {
    pub sql: String,
    pub params: Vec<String>,
}

impl StatementUnit {
    /// A statement with no bound parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// A statement with positional bound parameters
    pub fn with_params(sql: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }
}

impl fmt::Display for StatementUnit {
    /// Preview form: `<sql>;` followed by ` -- [p1, p2]` when parameters are bound.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};", self.sql)?;
        if self.has_params() {
            write!(f, " -- [{}]", self.params.join(", "))?;
        }
        Ok(())
    }
}

/// Ordered sequence of statements computed for one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationPlan {
    units: Vec<StatementUnit>,
}

impl MigrationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split raw schema text into statements.
    ///
    /// Splits on every `;`, including ones inside string literals or comments.
    /// Fragments are trimmed and empty ones discarded.
    pub fn from_raw_text(text: &str) -> Self {
        let units = text
            .split(STATEMENT_SEPARATOR)
            .map(str::trim)
            .filter(|stmt| !stmt.is_empty())
            .map(StatementUnit::new)
            .collect();
        Self { units }
    }

    /// Wrap an already-ordered list of statements without further splitting.
    pub fn from_statements<I, S>(statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            units: statements.into_iter().map(StatementUnit::new).collect(),
        }
    }

    /// Append one statement with bound parameters at the tail.
    pub fn append(&mut self, sql: impl Into<String>, params: Vec<String>) -> &mut Self {
        self.units.push(StatementUnit::with_params(sql, params));
        self
    }

    /// Append already-built units at the tail, preserving their order.
    pub fn extend(&mut self, units: impl IntoIterator<Item = StatementUnit>) -> &mut Self {
        self.units.extend(units);
        self
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatementUnit> {
        self.units.iter()
    }

    pub fn units(&self) -> &[StatementUnit] {
        &self.units
    }

    pub fn last(&self) -> Option<&StatementUnit> {
        self.units.last()
    }
}

impl<'a> IntoIterator for &'a MigrationPlan {
    type Item = &'a StatementUnit;
    type IntoIter = std::slice::Iter<'a, StatementUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
