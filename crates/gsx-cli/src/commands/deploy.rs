//! Deploy command implementation

use anyhow::{Context, Result};
use gsx_migrate::{ExecMode, Outcome};
use tokio_util::sync::CancellationToken;

use crate::cli::{DeployArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the deploy command
pub async fn execute(args: &DeployArgs, global: &GlobalArgs, cancel: CancellationToken) -> Result<()> {
    let ctx = RuntimeContext::new(global, &args.target)?;
    if args.deploy {
        ctx.require_persistent_database()?;
    }
    let reconciler = ctx.reconciler(cancel)?;

    let mode = if args.deploy {
        ExecMode::Apply
    } else {
        ExecMode::Preview
    };

    let mut stdout = std::io::stdout();
    let outcome = reconciler
        .reconcile(mode, &mut stdout)
        .await
        .with_context(|| format!("Failed to deploy {}", reconciler.schema_path()))?;

    log::info!(
        "{} statement(s) for revision {}",
        outcome.statements(),
        outcome.revision()
    );

    match outcome {
        Outcome::UpToDate { revision } => {
            println!("db version is equal to schema version ({})", revision);
        }
        Outcome::Initialized {
            revision,
            statements,
        } if args.deploy => {
            println!(
                "Initialized {} at {} ({} statement{})",
                reconciler.table(),
                revision,
                statements,
                plural(statements)
            );
        }
        Outcome::Upgraded {
            from,
            to,
            statements,
        } if args.deploy => {
            println!(
                "Upgraded {} -> {} ({} statement{})",
                from,
                to,
                statements,
                plural(statements)
            );
        }
        _ => {
            log::info!("Preview only, run with --deploy to apply");
        }
    }

    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
