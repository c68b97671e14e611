//! gsx-core - Core library for gsx
//!
//! This crate provides the types shared by every gsx component: revision
//! identifiers and schema snapshots, the statement plan that carries DDL to
//! the executor, and `gsx.yml` configuration parsing.

pub mod config;
pub mod error;
mod newtype_string;
pub mod plan;
pub mod revision;

pub use config::{Config, DatabaseConfig, Dialect};
pub use error::{CoreError, CoreResult};
pub use plan::{MigrationPlan, StatementUnit};
pub use revision::{RevisionId, SchemaSnapshot, TableName};
