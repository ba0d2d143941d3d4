//! WebSocket upgrade gate and session handling.
//!
//! # Responsibilities
//! - Extract credential candidates from the upgrade request
//! - Enforce the origin policy and the authentication gate before any
//!   bidirectional traffic is allowed
//! - Hand established sessions to the room coordinator's registry
//! - Close sessions promptly when draining begins
//!
//! # Design Decisions
//! - The decision is a pure function of one request plus the immutable
//!   config; concurrent upgrade attempts share no mutable state
//! - Rejections carry an opaque reason; which candidate matched is logged
//!   masked, the credential values never

use std::net::SocketAddr;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        ConnectInfo, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::gate::{authenticate, CredentialCandidate};

/// Query parameters recognized on the upgrade request.
#[derive(Debug, Deserialize)]
pub struct UpgradeQuery {
    /// Fallback credential for clients that cannot set headers.
    auth: Option<String>,
}

/// Gate one connection-upgrade attempt.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UpgradeQuery>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> Response {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    // Browsers always send Origin on WebSocket handshakes; non-browser
    // clients may omit it and are admitted subject to authentication.
    if let Some(ref origin) = origin {
        if !state.config.allowed_origins.permits(origin) {
            tracing::warn!(origin = %origin, peer = %peer, "Upgrade denied: origin not allowed");
            metrics::record_auth_attempt("ws", "origin_denied");
            return (StatusCode::FORBIDDEN, "Forbidden").into_response();
        }
    }

    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let candidates = [
        CredentialCandidate::header(auth_header),
        CredentialCandidate::query(query.auth.as_deref()),
    ];
    let decision = authenticate(&candidates, &state.config.auth_key);

    if !decision.accepted() {
        tracing::warn!(
            origin = origin.as_deref().unwrap_or("-"),
            peer = %peer,
            "Upgrade rejected"
        );
        metrics::record_auth_attempt("ws", "rejected");
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    tracing::info!(
        origin = origin.as_deref().unwrap_or("-"),
        peer = %peer,
        matched = decision.matched_source(),
        "Upgrade authenticated"
    );
    metrics::record_auth_attempt("ws", "accepted");

    ws.on_upgrade(move |socket| session(socket, state, origin))
}

/// Run one established session until it closes or the gateway drains.
///
/// Frame semantics beyond the handshake belong to the coordinator; this
/// loop only keeps the registration alive and reacts to close and drain.
async fn session(mut socket: WebSocket, state: AppState, origin: Option<String>) {
    // Subscribe before registering: if draining began first, the registry is
    // already destroyed and open() refuses; otherwise the signal arrives on
    // this receiver.
    let mut drain = state.shutdown.subscribe();

    let guard = match state.sessions.open(origin) {
        Some(guard) => guard,
        // Draining already; refuse to create session state.
        None => {
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    tracing::debug!(session_id = %guard.id(), "Session established");
    metrics::record_session_opened();
    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    tracing::debug!(session_id = %guard.id(), error = %error, "Session transport error");
                    break;
                }
            },
            _ = drain.recv() => {
                let _ = socket.send(Message::Close(None)).await;
                break;
            }
        }
    }

    metrics::record_session_closed();
    tracing::debug!(session_id = %guard.id(), "Session closed");
}
