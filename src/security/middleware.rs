//! Bearer authentication middleware for protected HTTP routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::gate::{authenticate, CredentialCandidate};

/// Require a valid `Authorization: Bearer <secret>` header.
///
/// Only the header candidate is consulted here. The introspection surface is
/// called by operators and scrapers that can always set headers, and a query
/// token would end up in URLs and access logs.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let candidates = [CredentialCandidate::header(auth_header)];
    let decision = authenticate(&candidates, &state.config.auth_key);

    if decision.accepted() {
        metrics::record_auth_attempt("http", "accepted");
        return next.run(request).await;
    }

    metrics::record_auth_attempt("http", "rejected");
    tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");

    // Opaque by design: no hint of which part of the credential was wrong.
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}
