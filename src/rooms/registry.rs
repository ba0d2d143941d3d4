//! Session registry: the attachment point for authenticated connections.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::json;
use uuid::Uuid;

use crate::rooms::RoomCoordinator;

/// Metadata kept per active session.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// Origin the client connected from, when it sent one.
    pub origin: Option<String>,
    pub connected_at: DateTime<Utc>,
}

/// Tracks the sessions the transport layer has handed over.
///
/// Shared state is limited to the concurrent map and two counters; there is
/// no per-request locking.
pub struct SessionRegistry {
    sessions: Arc<DashMap<Uuid, SessionInfo>>,
    opened_total: AtomicU64,
    destroyed: AtomicBool,
    started_at: DateTime<Utc>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            opened_total: AtomicU64::new(0),
            destroyed: AtomicBool::new(false),
            started_at: Utc::now(),
        }
    }

    /// Register an established session.
    ///
    /// Returns `None` once the registry has been destroyed: a connection
    /// upgraded during shutdown must not leave partial session state behind.
    /// The returned guard unregisters the session when dropped.
    pub fn open(&self, origin: Option<String>) -> Option<SessionGuard> {
        if self.destroyed.load(Ordering::SeqCst) {
            return None;
        }

        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            SessionInfo {
                origin,
                connected_at: Utc::now(),
            },
        );
        self.opened_total.fetch_add(1, Ordering::SeqCst);

        Some(SessionGuard {
            id,
            sessions: Arc::clone(&self.sessions),
        })
    }

    /// Number of currently registered sessions.
    pub fn active(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomCoordinator for SessionRegistry {
    fn stats(&self) -> serde_json::Value {
        json!({
            "active_sessions": self.sessions.len(),
            "total_sessions": self.opened_total.load(Ordering::SeqCst),
            "started_at": self.started_at.to_rfc3339(),
        })
    }

    fn destroy(&self) {
        // First caller wins; repeat calls are no-ops.
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }

        let released = self.sessions.len();
        self.sessions.clear();
        tracing::info!(released_sessions = released, "Room coordinator destroyed");
    }
}

/// Guard for one registered session. Unregisters on drop, so a session is
/// removed however its task ends.
pub struct SessionGuard {
    id: Uuid,
    sessions: Arc<DashMap<Uuid, SessionInfo>>,
}

impl SessionGuard {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.sessions.remove(&self.id);
        tracing::trace!(session_id = %self.id, "Session unregistered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_drop_tracks_counts() {
        let registry = SessionRegistry::new();
        assert_eq!(registry.active(), 0);

        let a = registry.open(Some("https://a.example".to_string())).unwrap();
        let b = registry.open(None).unwrap();
        assert_eq!(registry.active(), 2);

        drop(a);
        assert_eq!(registry.active(), 1);

        drop(b);
        assert_eq!(registry.active(), 0);

        // Total keeps counting even after sessions close.
        assert_eq!(registry.stats()["total_sessions"], 2);
    }

    #[test]
    fn stats_shape() {
        let registry = SessionRegistry::new();
        let _guard = registry.open(None).unwrap();

        let stats = registry.stats();
        assert_eq!(stats["active_sessions"], 1);
        assert_eq!(stats["total_sessions"], 1);
        assert!(stats["started_at"].is_string());
    }

    #[test]
    fn destroy_is_idempotent_and_blocks_new_sessions() {
        let registry = SessionRegistry::new();
        let _guard = registry.open(None).unwrap();

        registry.destroy();
        registry.destroy();

        assert_eq!(registry.active(), 0);
        assert!(registry.open(None).is_none());
    }
}
