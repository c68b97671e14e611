//! gsx-db - Database layer for gsx
//!
//! This crate provides the `Database` trait, its DuckDB implementation, and
//! the `VersionStore` that reads the deployed revision marker and builds the
//! statements that write it.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod version;

pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
pub use version::VersionStore;
