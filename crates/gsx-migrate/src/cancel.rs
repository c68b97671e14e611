//! Cancellation of a reconcile run.
//!
//! Every history and database await is raced against the run's
//! [`CancellationToken`]. The losing future is dropped, which kills a `git`
//! child still running. A statement already inside the database driver runs
//! to completion.

use crate::error::{MigrateError, MigrateResult};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Await `fut` unless `cancel` fires first
pub(crate) async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> MigrateResult<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(MigrateError::Cancelled),
        out = fut => Ok(out),
    }
}

/// Fail with [`MigrateError::Cancelled`] once cancelled
pub(crate) fn check(cancel: &CancellationToken) -> MigrateResult<()> {
    if cancel.is_cancelled() {
        Err(MigrateError::Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[path = "cancel_test.rs"]
mod tests;
