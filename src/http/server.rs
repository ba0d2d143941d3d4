//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, compression, CORS, headers)
//! - Serve with graceful shutdown, racing the forced drain deadline

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::{handlers, websocket};
use crate::lifecycle::Shutdown;
use crate::rooms::{RoomCoordinator, SessionRegistry};
use crate::security;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    /// Boundary view of the room subsystem: stats and destroy only.
    pub rooms: Arc<dyn RoomCoordinator>,
    /// Transport-side view: where established sessions are registered.
    pub sessions: Arc<SessionRegistry>,
    pub shutdown: Arc<Shutdown>,
    pub started_at: Instant,
}

/// How serving ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// Listener closed within the drain deadline.
    Clean,
    /// Draining did not finish in time; the process must exit non-zero.
    ForcedTimeout,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let cors = security::cors::cors_layer(&state.config.allowed_origins);

        let protected = Router::new()
            .route("/stats", get(handlers::stats))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                security::middleware::require_bearer,
            ));

        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/ws", get(websocket::ws_handler))
            .merge(protected)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .layer(CompressionLayer::new())
            .layer(cors)
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
    }

    /// Serve until the gateway drains or the drain deadline forces the issue.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: Arc<Shutdown>,
    ) -> Result<ServeOutcome, std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Gateway listening");

        let mut drain = shutdown.subscribe();
        let serve = axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = drain.recv().await;
            tracing::info!("Draining: no longer accepting connections");
        })
        .into_future();

        tokio::select! {
            result = serve => {
                result?;
                shutdown.mark_terminated();
                tracing::info!("HTTP server closed");
                Ok(ServeOutcome::Clean)
            }
            _ = shutdown.forced_deadline() => {
                tracing::error!("Drain deadline elapsed, forcing shutdown");
                Ok(ServeOutcome::ForcedTimeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AllowedOrigins, Environment, ObservabilityConfig, SharedSecret, ShutdownConfig,
        TaskFailurePolicy,
    };
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let config = Arc::new(GatewayConfig {
            port: 0,
            auth_key: SharedSecret::new("secret123").unwrap(),
            allowed_origins: AllowedOrigins::Any,
            environment: Environment::Test,
            shutdown: ShutdownConfig { grace_secs: 1 },
            observability: ObservabilityConfig::default(),
            fault_policy: TaskFailurePolicy::Log,
        });
        let sessions = Arc::new(SessionRegistry::new());
        let rooms: Arc<dyn RoomCoordinator> = sessions.clone();
        let shutdown = Arc::new(Shutdown::new(rooms.clone(), Duration::from_secs(1)));

        AppState {
            config,
            rooms,
            sessions,
            shutdown,
            started_at: Instant::now(),
        }
    }

    #[tokio::test]
    async fn health_is_public() {
        let router = HttpServer::build_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::AUTHORIZATION, "Bearer nonsense")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn stats_requires_bearer() {
        let router = HttpServer::build_router(test_state());

        let response = router
            .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn stats_accepts_valid_bearer() {
        let router = HttpServer::build_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/stats")
                    .header(header::AUTHORIZATION, "Bearer secret123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn stats_ignores_query_token() {
        let router = HttpServer::build_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/stats?auth=secret123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
