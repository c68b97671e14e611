//! SQL dialects the schema can be written in

use sqlparser::ast::Statement;
use sqlparser::dialect::{
    Dialect, DuckDbDialect as SqlParserDuckDb, GenericDialect as SqlParserGeneric,
    MySqlDialect as SqlParserMySql,
};
use sqlparser::parser::Parser;

use crate::error::{SqlError, SqlResult};

/// A sqlparser dialect plus the DDL conventions of its database
pub trait SqlDialect: Send + Sync {
    fn parser_dialect(&self) -> &dyn Dialect;

    fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        Parser::parse_sql(self.parser_dialect(), sql).map_err(|e| SqlError::ParseError(e.to_string()))
    }

    /// Whether changed columns are rewritten whole (`MODIFY COLUMN <def>`)
    /// instead of through per-attribute `ALTER COLUMN` clauses.
    ///
    /// Dialects that alter per attribute also add columns bare (name, type,
    /// default) and apply `NOT NULL` with a separate statement.
    fn rewrites_whole_column(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}

macro_rules! schema_dialect {
    ($(#[$meta:meta])* $Name:ident, $Inner:ident, $label:literal, whole_column = $whole:literal) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $Name {
            dialect: $Inner,
        }

        impl $Name {
            pub fn new() -> Self {
                Self { dialect: $Inner {} }
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl SqlDialect for $Name {
            fn parser_dialect(&self) -> &dyn Dialect {
                &self.dialect
            }

            fn rewrites_whole_column(&self) -> bool {
                $whole
            }

            fn name(&self) -> &'static str {
                $label
            }
        }
    };
}

schema_dialect!(
    /// DuckDB, the default target
    DuckDbDialect, SqlParserDuckDb, "duckdb", whole_column = false
);
schema_dialect!(
    /// MySQL: columns change through `MODIFY COLUMN`
    MySqlDialect, SqlParserMySql, "mysql", whole_column = true
);
schema_dialect!(GenericDialect, SqlParserGeneric, "generic", whole_column = false);

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
