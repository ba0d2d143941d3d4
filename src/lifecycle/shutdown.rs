//! Shutdown coordination for the gateway.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::rooms::RoomCoordinator;

/// What pushed the process into draining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Interrupt signal (Ctrl+C).
    Interrupt,
    /// Termination signal from the supervisor.
    Terminate,
    /// An uncaught fault, treated like a termination signal.
    Fault,
}

impl std::fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShutdownReason::Interrupt => "SIGINT",
            ShutdownReason::Terminate => "SIGTERM",
            ShutdownReason::Fault => "FAULT",
        };
        f.write_str(name)
    }
}

/// Process lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    /// Accepting connections.
    Running,
    /// No new connections; in-flight work finishing.
    Draining,
    /// Listener closed.
    Terminated,
}

const RUNNING: u8 = 0;
const DRAINING: u8 = 1;
const TERMINATED: u8 = 2;

/// Coordinator for graceful shutdown.
///
/// Owns the one-shot lifecycle transition: whichever signal or fault handler
/// calls [`begin`](Shutdown::begin) first performs the whole sequence, all
/// later callers no-op. The drain signal fans out over a broadcast channel
/// that the server and every session task subscribe to.
pub struct Shutdown {
    state: AtomicU8,
    tx: broadcast::Sender<()>,
    rooms: Arc<dyn RoomCoordinator>,
    grace: Duration,
}

impl Shutdown {
    pub fn new(rooms: Arc<dyn RoomCoordinator>, grace: Duration) -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            state: AtomicU8::new(RUNNING),
            tx,
            rooms,
            grace,
        }
    }

    /// Begin the shutdown sequence. Returns whether this call triggered it.
    ///
    /// The triggering call destroys the room coordinator first, so room
    /// state is released even if the listener close hangs, then broadcasts
    /// the drain signal.
    pub fn begin(&self, reason: ShutdownReason) -> bool {
        let first = self
            .state
            .compare_exchange(RUNNING, DRAINING, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();

        if !first {
            tracing::debug!(reason = %reason, "Shutdown already in progress");
            return false;
        }

        tracing::info!(reason = %reason, "Shutting down gracefully");
        self.rooms.destroy();
        let _ = self.tx.send(());
        true
    }

    /// Subscribe to the drain signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> ShutdownState {
        match self.state.load(Ordering::SeqCst) {
            RUNNING => ShutdownState::Running,
            DRAINING => ShutdownState::Draining,
            _ => ShutdownState::Terminated,
        }
    }

    pub fn is_draining(&self) -> bool {
        self.state.load(Ordering::SeqCst) != RUNNING
    }

    /// Record that the listener finished closing.
    pub fn mark_terminated(&self) {
        self.state.store(TERMINATED, Ordering::SeqCst);
    }

    /// Resolves once the drain deadline has passed.
    ///
    /// Pending forever while the process is running; once draining begins,
    /// resolves after the configured grace period. The server races this
    /// against graceful close to guarantee shutdown never hangs.
    pub async fn forced_deadline(&self) {
        let mut rx = self.subscribe();
        if !self.is_draining() {
            // A send only happens on the Running -> Draining edge, so either
            // we observe the state or we receive the signal.
            let _ = rx.recv().await;
        }
        tokio::time::sleep(self.grace).await;
    }
}
