//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// gsx - Deploy a SQL schema file tracked in git to a database
#[derive(Parser, Debug)]
#[command(name = "gsx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Git working directory holding the schema file
    #[arg(short, long, global = true, default_value = ".")]
    pub workspace: String,

    /// Override config file path (default: gsx.yml in the workspace)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bring the database to the schema at a commit (preview unless --deploy)
    Deploy(DeployArgs),

    /// Show the deployed and desired schema revisions
    Status(StatusArgs),
}

/// Connection and schema options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Database path (DuckDB file or :memory:)
    #[arg(long, env = "GSX_DSN")]
    pub dsn: Option<String>,

    /// Name of the table recording the deployed revision
    #[arg(long)]
    pub table: Option<String>,

    /// Schema file path, relative to the workspace
    #[arg(long)]
    pub schema: Option<String>,

    /// SQL dialect used to diff the schema (duckdb, mysql, generic)
    #[arg(long)]
    pub dialect: Option<String>,

    /// Commit (or any git revision) to take the schema from
    #[arg(long, default_value = "HEAD")]
    pub commit: String,
}

/// Arguments for the deploy command
#[derive(Args, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Execute the statements instead of printing them
    #[arg(long)]
    pub deploy: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format for reporting commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
