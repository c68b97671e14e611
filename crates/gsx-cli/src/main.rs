//! gsx - deploy a SQL schema file tracked in git to a database

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;

mod cli;
mod commands;
mod context;
mod signal;

use cli::Cli;
use commands::{deploy, status};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let cancel = CancellationToken::new();
    signal::cancel_on_shutdown(cancel.clone());

    match &cli.command {
        cli::Commands::Deploy(args) => deploy::execute(args, &cli.global, cancel).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global, cancel).await,
    }
}

/// `warn` by default, `debug` with --verbose; `RUST_LOG` wins over both.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
