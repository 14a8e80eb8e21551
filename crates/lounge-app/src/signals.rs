//! OS signal handling for graceful shutdown
//!
//! A signal becomes an ordinary [`Message::Quit`], so the engine tears the
//! ticker and the mounted driver down the same way a typed `quit` does.

use lounge_core::prelude::*;
use tokio::sync::mpsc;

use crate::message::Message;

/// Which OS request ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Spawn a task that listens for OS signals and sends a quit message
///
/// If the handlers cannot be installed the session keeps running; the
/// stdin `quit` command still ends it cleanly.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(signal) => {
                info!("{} received, stopping the session", signal);
                forward_quit(&tx).await;
            }
            Err(e) => warn!("{}; only an explicit quit will stop the session", e),
        }
    });
}

async fn forward_quit(tx: &mpsc::Sender<Message>) {
    if tx.send(Message::Quit).await.is_err() {
        debug!("Engine already gone, nothing to stop");
    }
}

/// Wait for a termination signal
async fn wait_for_signal() -> Result<ShutdownSignal> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())
            .map_err(|e| Error::signal_setup("SIGINT", e))?;
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| Error::signal_setup("SIGTERM", e))?;

        let received = tokio::select! {
            _ = sigint.recv() => ShutdownSignal::Interrupt,
            _ = sigterm.recv() => ShutdownSignal::Terminate,
        };
        Ok(received)
    }

    #[cfg(windows)]
    {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| Error::signal_setup("Ctrl+C", e))?;
        Ok(ShutdownSignal::Interrupt)
    }
}
