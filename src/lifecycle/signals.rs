//! OS signal handling.

use std::sync::Arc;

use crate::lifecycle::shutdown::{Shutdown, ShutdownReason};

/// Translate termination signals into the shutdown sequence.
///
/// Runs for the life of the process. Repeat signals after the first are
/// absorbed by the one-shot transition in [`Shutdown::begin`].
#[cfg(unix)]
pub async fn listen(shutdown: Arc<Shutdown>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    loop {
        let reason = tokio::select! {
            _ = interrupt.recv() => ShutdownReason::Interrupt,
            _ = terminate.recv() => ShutdownReason::Terminate,
        };
        shutdown.begin(reason);
    }
}

#[cfg(not(unix))]
pub async fn listen(shutdown: Arc<Shutdown>) -> std::io::Result<()> {
    loop {
        tokio::signal::ctrl_c().await?;
        shutdown.begin(ShutdownReason::Interrupt);
    }
}
