//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT (all platforms) and SIGTERM (unix)
//! - Translate the first one into a shutdown trigger
//!
//! # Design Decisions
//! - A listener that cannot be installed is logged, not fatal; the
//!   monitor keeps running and can still be killed

use std::io;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Wait for the next stop signal and return its name.
#[cfg(unix)]
pub async fn stop_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

/// Wait for the next stop signal and return its name.
#[cfg(not(unix))]
pub async fn stop_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|_| "Ctrl-C")
}

/// Spawn a task that triggers `shutdown` on the first stop signal.
pub fn spawn_signal_listener(shutdown: Arc<Shutdown>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match stop_signal().await {
            Ok(name) => {
                tracing::info!(signal = name, "Stop signal received");
                shutdown.trigger();
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for stop signals"),
        }
    })
}
