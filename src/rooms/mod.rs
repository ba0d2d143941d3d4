//! The room-coordination boundary.
//!
//! Room and playback semantics live behind the [`RoomCoordinator`] trait;
//! the gateway only lets connections in or keeps them out. The gateway
//! consumes exactly two operations: `stats()` for the introspection surface
//! and `destroy()` during shutdown. [`SessionRegistry`] is the in-process
//! implementation that established sessions are handed to.

pub mod registry;

pub use registry::{SessionGuard, SessionRegistry};

/// The room-coordination subsystem as seen from the gateway.
pub trait RoomCoordinator: Send + Sync {
    /// Operational statistics, returned unmodified by the stats endpoint.
    fn stats(&self) -> serde_json::Value;

    /// Release all room state. Called at most once per process, when
    /// shutdown begins and before the listener finishes closing.
    /// Implementations must be idempotent and must not panic.
    fn destroy(&self);
}
