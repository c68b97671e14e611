//! gsx-sql - SQL layer for gsx
//!
//! This crate wraps sqlparser-rs with dialect support and provides the
//! `DiffEngine` contract together with `SchemaDiffer`, a table- and
//! column-level diff between two schema texts.

pub mod dialect;
pub mod diff;
pub mod error;
pub mod parser;

pub use dialect::{DuckDbDialect, GenericDialect, MySqlDialect, SqlDialect};
pub use diff::{Change, DiffEngine, DiffOptions, SchemaDiff, SchemaDiffer};
pub use error::{SchemaSide, SqlError, SqlResult};
pub use parser::SqlParser;
