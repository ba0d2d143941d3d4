use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::net::TcpListener;

use room_gateway::config;
use room_gateway::http::{AppState, HttpServer, ServeOutcome};
use room_gateway::lifecycle::{fault, signals, Shutdown};
use room_gateway::observability;
use room_gateway::rooms::{RoomCoordinator, SessionRegistry};

#[tokio::main]
async fn main() -> ExitCode {
    observability::logging::init();

    tracing::info!("room-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    // Config errors are fatal before the listener ever binds.
    let config = match config::loader::from_env() {
        Ok(config) => Arc::new(config),
        Err(error) => {
            tracing::error!(error = %error, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        port = config.port,
        environment = config.environment.as_str(),
        allowed_origins = ?config.allowed_origins,
        shutdown_grace_secs = config.shutdown.grace_secs,
        "Configuration loaded"
    );

    let sessions = Arc::new(SessionRegistry::new());
    let rooms: Arc<dyn RoomCoordinator> = sessions.clone();
    let shutdown = Arc::new(Shutdown::new(
        rooms.clone(),
        Duration::from_secs(config.shutdown.grace_secs),
    ));

    fault::install_panic_hook(shutdown.clone());
    fault::supervise(
        "signal-listener",
        config.fault_policy,
        shutdown.clone(),
        signals::listen(shutdown.clone()),
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(error) = observability::metrics::init_metrics(addr) {
                    tracing::error!(error = %error, "Failed to start metrics exporter");
                }
            }
            Err(error) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %error,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let listener = match TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(address = %config.bind_address(), error = %error, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState {
        config,
        rooms,
        sessions,
        shutdown: shutdown.clone(),
        started_at: Instant::now(),
    };

    let server = HttpServer::new(state);
    match server.run(listener, shutdown).await {
        Ok(ServeOutcome::Clean) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Ok(ServeOutcome::ForcedTimeout) => ExitCode::FAILURE,
        Err(error) => {
            tracing::error!(error = %error, "Server error");
            ExitCode::FAILURE
        }
    }
}
