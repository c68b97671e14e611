//! SIGINT / SIGTERM / SIGQUIT handling: cancels the running reconcile

use tokio_util::sync::CancellationToken;

/// Install the shutdown handlers, then spawn a task that cancels `cancel` on
/// the first signal.
pub fn cancel_on_shutdown(cancel: CancellationToken) {
    let mut signals = match ShutdownSignals::install() {
        Ok(signals) => signals,
        Err(e) => {
            log::warn!("Failed to install signal handlers: {}", e);
            return;
        }
    };
    tokio::spawn(async move {
        if let Some(name) = signals.recv().await {
            log::warn!("Received {}, aborting the deploy", name);
            cancel.cancel();
        }
    });
}

#[cfg(unix)]
struct ShutdownSignals {
    term: tokio::signal::unix::Signal,
    int: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    fn install() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            term: signal(SignalKind::terminate())?,
            int: signal(SignalKind::interrupt())?,
            quit: signal(SignalKind::quit())?,
        })
    }

    async fn recv(&mut self) -> Option<&'static str> {
        tokio::select! {
            _ = self.term.recv() => Some("SIGTERM"),
            _ = self.int.recv() => Some("SIGINT"),
            _ = self.quit.recv() => Some("SIGQUIT"),
        }
    }
}

#[cfg(not(unix))]
struct ShutdownSignals;

#[cfg(not(unix))]
impl ShutdownSignals {
    fn install() -> std::io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> Option<&'static str> {
        match tokio::signal::ctrl_c().await {
            Ok(()) => Some("Ctrl+C"),
            Err(e) => {
                log::warn!("Failed to install Ctrl+C handler: {}", e);
                None
            }
        }
    }
}

#[cfg(all(test, unix))]
#[path = "signal_test.rs"]
mod tests;
