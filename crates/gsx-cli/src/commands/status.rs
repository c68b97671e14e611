//! Status command implementation

use anyhow::{Context, Result};
use gsx_migrate::{Status, Transition};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::context::RuntimeContext;

/// JSON form of a status report
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    schema: &'a str,
    table: &'a str,
    desired: &'a str,
    current: Option<&'a str>,
    action: &'static str,
}

impl<'a> StatusReport<'a> {
    fn new(schema: &'a str, table: &'a str, status: &'a Status) -> Self {
        Self {
            schema,
            table,
            desired: status.desired.as_str(),
            current: status.current.as_ref().map(|r| r.as_str()),
            action: action_name(&status.transition),
        }
    }
}

fn action_name(transition: &Transition) -> &'static str {
    match transition {
        Transition::Initialize => "initialize",
        Transition::NoOp => "none",
        Transition::Upgrade { .. } => "upgrade",
    }
}

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs, cancel: CancellationToken) -> Result<()> {
    let ctx = RuntimeContext::new(global, &args.target)?;
    let reconciler = ctx.reconciler(cancel)?;

    let status = reconciler
        .status()
        .await
        .with_context(|| format!("Failed to read status of {}", reconciler.schema_path()))?;
    let report = StatusReport::new(reconciler.schema_path(), reconciler.table().as_str(), &status);

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Schema:   {}", report.schema);
            println!("Table:    {}", report.table);
            println!("Desired:  {}", report.desired);
            println!("Deployed: {}", report.current.unwrap_or("(not initialized)"));
            match &status.transition {
                Transition::NoOp => {
                    println!("db version is equal to schema version ({})", status.desired)
                }
                other => println!("Pending:  {}", other),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
