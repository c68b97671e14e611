//! Schema diff engine.
//!
//! [`DiffEngine`] is the contract the orchestrator depends on: given the
//! deployed schema text and the desired schema text, produce the ordered DDL
//! that turns one into the other.
//!
//! [`SchemaDiffer`] is the bundled implementation. It parses both texts with
//! sqlparser and compares `CREATE TABLE` statements:
//!
//! - tables only in the old schema are dropped
//! - tables only in the new schema are created as written
//! - tables in both are compared column by column (add, drop, type,
//!   nullability, default)
//!
//! Unquoted identifiers match case-insensitively, quoted ones exactly.
//!
//! Any other statement that appears only in the new schema is emitted
//! verbatim. Statements that disappear are reported with a warning and left
//! for the operator, since undoing an arbitrary statement is not derivable
//! from its text.
//!
//! Output order is drops, creates, alters, then other statements.

use crate::error::{SchemaSide, SqlError, SqlResult};
use crate::parser::SqlParser;
use sqlparser::ast::{ColumnDef, ColumnOption, CreateTable, Ident, Statement};
use std::collections::{HashMap, HashSet};

/// Options for a single diff invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Wrap a non-empty result in `BEGIN TRANSACTION` / `COMMIT`
    pub transactional: bool,
}

/// Produces the ordered DDL transforming one schema into another
pub trait DiffEngine: Send + Sync {
    /// Diff `old` against `new`. Fails with a parse failure if either text is
    /// not valid SQL for the engine's dialect.
    fn diff(&self, old: &str, new: &str, options: DiffOptions) -> SqlResult<Vec<String>>;
}

/// A single schema change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Drop a table that no longer exists.
    DropTable { table: String },
    /// Create a new table; holds the full statement.
    CreateTable { table: String, sql: String },
    /// Add a column; holds the full column definition.
    AddColumn { table: String, definition: String },
    /// Drop a column.
    DropColumn { table: String, column: String },
    /// Change a column's type.
    AlterColumnType {
        table: String,
        column: String,
        data_type: String,
    },
    /// Change a column's nullability.
    AlterColumnNullable {
        table: String,
        column: String,
        nullable: bool,
    },
    /// Change or remove a column's default.
    AlterColumnDefault {
        table: String,
        column: String,
        default: Option<String>,
    },
    /// Replace a column definition wholesale (MySQL).
    ModifyColumn { table: String, definition: String },
    /// A non-table statement new in the desired schema.
    Statement { sql: String },
}

impl Change {
    /// Generate the SQL statement for this change (no trailing `;`).
    pub fn to_sql(&self) -> String {
        match self {
            Change::DropTable { table } => format!("DROP TABLE {}", table),
            Change::CreateTable { sql, .. } => sql.clone(),
            Change::AddColumn { table, definition } => {
                format!("ALTER TABLE {} ADD COLUMN {}", table, definition)
            }
            Change::DropColumn { table, column } => {
                format!("ALTER TABLE {} DROP COLUMN {}", table, column)
            }
            Change::AlterColumnType {
                table,
                column,
                data_type,
            } => format!(
                "ALTER TABLE {} ALTER COLUMN {} SET DATA TYPE {}",
                table, column, data_type
            ),
            Change::AlterColumnNullable {
                table,
                column,
                nullable,
            } => {
                if *nullable {
                    format!("ALTER TABLE {} ALTER COLUMN {} DROP NOT NULL", table, column)
                } else {
                    format!("ALTER TABLE {} ALTER COLUMN {} SET NOT NULL", table, column)
                }
            }
            Change::AlterColumnDefault {
                table,
                column,
                default,
            } => match default {
                Some(default) => format!(
                    "ALTER TABLE {} ALTER COLUMN {} SET DEFAULT {}",
                    table, column, default
                ),
                None => format!("ALTER TABLE {} ALTER COLUMN {} DROP DEFAULT", table, column),
            },
            Change::ModifyColumn { table, definition } => {
                format!("ALTER TABLE {} MODIFY COLUMN {}", table, definition)
            }
            Change::Statement { sql } => sql.clone(),
        }
    }
}

/// The changes between two schemas, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    pub changes: Vec<Change>,
}

impl SchemaDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Render the changes as statements, optionally wrapped in a transaction.
    pub fn to_statements(&self, transactional: bool) -> Vec<String> {
        let mut stmts: Vec<String> = self.changes.iter().map(Change::to_sql).collect();
        if transactional && !stmts.is_empty() {
            stmts.insert(0, "BEGIN TRANSACTION".to_string());
            stmts.push("COMMIT".to_string());
        }
        stmts
    }
}

/// A `CREATE TABLE` found in a schema, keyed by its unquoted name
struct TableDef<'a> {
    key: String,
    display: String,
    create: &'a CreateTable,
}

/// Statements of one schema, split into tables and everything else
struct ParsedSchema<'a> {
    tables: Vec<TableDef<'a>>,
    others: Vec<String>,
}

impl<'a> ParsedSchema<'a> {
    fn collect(side: SchemaSide, stmts: &'a [Statement]) -> SqlResult<Self> {
        let mut tables = Vec::new();
        let mut seen = HashSet::new();
        let mut others = Vec::new();

        for stmt in stmts {
            match stmt {
                Statement::CreateTable(create) => {
                    let display = create.name.to_string();
                    let key = table_key(&display);
                    if !seen.insert(key.clone()) {
                        return Err(SqlError::DuplicateTable {
                            side,
                            table: display,
                        });
                    }
                    tables.push(TableDef {
                        key,
                        display,
                        create,
                    });
                }
                other => others.push(other.to_string()),
            }
        }

        Ok(Self { tables, others })
    }

    fn table(&self, key: &str) -> Option<&TableDef<'a>> {
        self.tables.iter().find(|t| t.key == key)
    }
}

/// Identity of a rendered table name: each dot-separated part is lowercased
/// unless quoted, in which case the quotes are removed and case kept
fn table_key(name: &str) -> String {
    name.split('.')
        .map(|part| match part.chars().next() {
            Some('"') | Some('`') => part.trim_matches(|c| c == '"' || c == '`').to_string(),
            _ => part.to_lowercase(),
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Identity of a column name
fn column_key(ident: &Ident) -> String {
    match ident.quote_style {
        Some(_) => ident.value.clone(),
        None => ident.value.to_lowercase(),
    }
}

/// `name type [DEFAULT expr]`: the part of a column definition every
/// dialect accepts in `ADD COLUMN`
fn bare_column(col: &ColumnDef) -> String {
    match default_of(col) {
        Some(default) => format!("{} {} DEFAULT {}", col.name, col.data_type, default),
        None => format!("{} {}", col.name, col.data_type),
    }
}

fn is_not_null(col: &ColumnDef) -> bool {
    col.options
        .iter()
        .any(|opt| matches!(opt.option, ColumnOption::NotNull))
}

fn default_of(col: &ColumnDef) -> Option<String> {
    col.options.iter().find_map(|opt| match &opt.option {
        ColumnOption::Default(expr) => Some(expr.to_string()),
        _ => None,
    })
}

/// Table and column level diff engine over sqlparser
pub struct SchemaDiffer {
    parser: SqlParser,
}

impl SchemaDiffer {
    pub fn new(parser: SqlParser) -> Self {
        Self { parser }
    }

    /// Create a differ for a dialect name (`duckdb`, `mysql`, `generic`)
    pub fn from_dialect_name(name: &str) -> SqlResult<Self> {
        Ok(Self::new(SqlParser::from_dialect_name(name)?))
    }

    fn parse(&self, side: SchemaSide, sql: &str) -> SqlResult<Vec<Statement>> {
        self.parser
            .parse_schema(sql)
            .map_err(|e| SqlError::ParseFailure {
                side,
                source: Box::new(e),
            })
    }

    /// Compute the changes that turn `old` into `new`.
    pub fn compare(&self, old: &str, new: &str) -> SqlResult<SchemaDiff> {
        let old_stmts = self.parse(SchemaSide::Old, old)?;
        let new_stmts = self.parse(SchemaSide::New, new)?;
        let old_schema = ParsedSchema::collect(SchemaSide::Old, &old_stmts)?;
        let new_schema = ParsedSchema::collect(SchemaSide::New, &new_stmts)?;

        let mut changes = Vec::new();

        for table in &old_schema.tables {
            if new_schema.table(&table.key).is_none() {
                changes.push(Change::DropTable {
                    table: table.display.clone(),
                });
            }
        }

        for table in &new_schema.tables {
            if old_schema.table(&table.key).is_none() {
                changes.push(Change::CreateTable {
                    table: table.display.clone(),
                    sql: Statement::CreateTable(table.create.clone()).to_string(),
                });
            }
        }

        for table in &new_schema.tables {
            if let Some(old_table) = old_schema.table(&table.key) {
                changes.extend(self.diff_columns(&table.display, old_table.create, table.create));
            }
        }

        let old_others: HashSet<&str> = old_schema.others.iter().map(String::as_str).collect();
        let new_others: HashSet<&str> = new_schema.others.iter().map(String::as_str).collect();

        for sql in &new_schema.others {
            if !old_others.contains(sql.as_str()) {
                changes.push(Change::Statement { sql: sql.clone() });
            }
        }
        for sql in &old_schema.others {
            if !new_others.contains(sql.as_str()) {
                log::warn!(
                    "Statement removed from schema must be reverted manually: {}",
                    sql
                );
            }
        }

        Ok(SchemaDiff { changes })
    }

    /// Diff the columns of a table present in both schemas.
    fn diff_columns(&self, table: &str, old: &CreateTable, new: &CreateTable) -> Vec<Change> {
        let whole_column = self.parser.dialect().rewrites_whole_column();
        let mut changes = Vec::new();

        let old_cols: HashMap<String, &ColumnDef> =
            old.columns.iter().map(|c| (column_key(&c.name), c)).collect();
        let new_cols: HashMap<String, &ColumnDef> =
            new.columns.iter().map(|c| (column_key(&c.name), c)).collect();

        for col in &old.columns {
            if !new_cols.contains_key(&column_key(&col.name)) {
                changes.push(Change::DropColumn {
                    table: table.to_string(),
                    column: col.name.to_string(),
                });
            }
        }

        for col in &new.columns {
            if old_cols.contains_key(&column_key(&col.name)) {
                continue;
            }
            if whole_column {
                changes.push(Change::AddColumn {
                    table: table.to_string(),
                    definition: col.to_string(),
                });
                continue;
            }

            changes.push(Change::AddColumn {
                table: table.to_string(),
                definition: bare_column(col),
            });
            if is_not_null(col) {
                changes.push(Change::AlterColumnNullable {
                    table: table.to_string(),
                    column: col.name.to_string(),
                    nullable: false,
                });
            }
            let dropped = col.options.iter().filter(|opt| {
                !matches!(opt.option, ColumnOption::NotNull | ColumnOption::Null | ColumnOption::Default(_))
            });
            for opt in dropped {
                log::warn!(
                    "Constraint on new column {}.{} must be added manually: {}",
                    table,
                    col.name,
                    opt
                );
            }
        }

        for col in &new.columns {
            let Some(old_col) = old_cols.get(&column_key(&col.name)) else {
                continue;
            };
            if col.to_string() == old_col.to_string() {
                continue;
            }

            if whole_column {
                changes.push(Change::ModifyColumn {
                    table: table.to_string(),
                    definition: col.to_string(),
                });
                continue;
            }

            let column = old_col.name.to_string();
            if col.data_type.to_string() != old_col.data_type.to_string() {
                changes.push(Change::AlterColumnType {
                    table: table.to_string(),
                    column: column.clone(),
                    data_type: col.data_type.to_string(),
                });
            }
            if is_not_null(col) != is_not_null(old_col) {
                changes.push(Change::AlterColumnNullable {
                    table: table.to_string(),
                    column: column.clone(),
                    nullable: !is_not_null(col),
                });
            }
            let default = default_of(col);
            if default != default_of(old_col) {
                changes.push(Change::AlterColumnDefault {
                    table: table.to_string(),
                    column,
                    default,
                });
            }
        }

        changes
    }
}

impl Default for SchemaDiffer {
    fn default() -> Self {
        Self::new(SqlParser::default())
    }
}

impl DiffEngine for SchemaDiffer {
    fn diff(&self, old: &str, new: &str, options: DiffOptions) -> SqlResult<Vec<String>> {
        let diff = self.compare(old, new)?;
        log::debug!(
            "Schema diff ({}): {} change(s)",
            self.parser.dialect_name(),
            diff.len()
        );
        Ok(diff.to_statements(options.transactional))
    }
}

#[cfg(test)]
#[path = "diff_test.rs"]
mod tests;
