//! HTTP endpoint handlers.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: EndpointList,
}

#[derive(Serialize)]
pub struct EndpointList {
    pub health: &'static str,
    pub stats: &'static str,
    pub ws: &'static str,
}

/// Static service metadata.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "room-gateway",
        version: env!("CARGO_PKG_VERSION"),
        description: "Real-time connection gateway for watch rooms",
        endpoints: EndpointList {
            health: "/health",
            stats: "/stats (requires auth)",
            ws: "/ws (requires auth)",
        },
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: u64,
}

/// Liveness probe.
///
/// Must stay cheap and dependency-free: it never calls into the room
/// coordinator, so it answers even when room state is wedged.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs(),
    })
}

/// Coordinator statistics, passed through unmodified.
///
/// Reached only through the bearer middleware.
pub async fn stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.rooms.stats())
}
