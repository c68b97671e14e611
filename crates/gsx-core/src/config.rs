//! Configuration types and parsing for gsx.yml

use crate::error::{CoreError, CoreResult};
use crate::revision::TableName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Config file names looked up in the workspace, in order.
const CONFIG_FILE_NAMES: &[&str] = &["gsx.yml", "gsx.yaml"];

const DEFAULT_DB_PATH: &str = ":memory:";

/// Workspace configuration from gsx.yml
///
/// Every field can be overridden from the command line; a workspace without a
/// config file uses [`Config::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the schema file, relative to the workspace
    #[serde(default)]
    pub schema: Option<String>,

    /// Name of the marker table holding the deployed revision
    #[serde(default)]
    pub table: TableName,

    /// SQL dialect used to parse and diff the schema
    #[serde(default)]
    pub dialect: Dialect,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: None,
            table: TableName::default(),
            dialect: Dialect::default(),
            database: DatabaseConfig::default(),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the DuckDB database file (`:memory:` for a throwaway database)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the database lives only as long as the connection
    pub fn is_in_memory(&self) -> bool {
        self.path.trim() == DEFAULT_DB_PATH
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

/// SQL dialect for schema parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// DuckDB SQL dialect
    #[default]
    DuckDb,
    /// MySQL dialect
    MySql,
    /// ANSI-ish generic dialect
    Generic,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::DuckDb => write!(f, "duckdb"),
            Dialect::MySql => write!(f, "mysql"),
            Dialect::Generic => write!(f, "generic"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "duckdb" => Ok(Dialect::DuckDb),
            "mysql" => Ok(Dialect::MySql),
            "generic" => Ok(Dialect::Generic),
            other => Err(CoreError::ConfigInvalid {
                message: format!("unknown dialect '{}' (expected duckdb, mysql, or generic)", other),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load gsx.yml (or gsx.yaml) from a workspace directory, falling back to
    /// defaults when neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => {
                log::debug!("No config file in {}, using defaults", dir.display());
                Ok(Self::default())
            }
        }
    }

    /// Locate a config file in `dir`
    pub fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Schema path, required by every command that reads history
    pub fn schema_path(&self) -> CoreResult<&str> {
        self.schema
            .as_deref()
            .ok_or_else(|| CoreError::ConfigInvalid {
                message: "no schema file configured (set `schema` in gsx.yml or pass --schema)"
                    .to_string(),
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(schema) = &self.schema {
            if schema.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "schema path cannot be empty".to_string(),
                });
            }
            if Path::new(schema).is_absolute() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("schema path must be relative to the workspace: {}", schema),
                });
            }
        }

        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database path cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
