//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use room_gateway::config::{
    AllowedOrigins, Environment, GatewayConfig, ObservabilityConfig, SharedSecret, ShutdownConfig,
    TaskFailurePolicy,
};
use room_gateway::http::{AppState, HttpServer, ServeOutcome};
use room_gateway::lifecycle::Shutdown;
use room_gateway::rooms::{RoomCoordinator, SessionRegistry};

/// A gateway running on an ephemeral port, with handles for assertions.
///
/// Not every test binary touches every handle.
#[allow(dead_code)]
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Arc<Shutdown>,
    pub sessions: Arc<SessionRegistry>,
    pub server: tokio::task::JoinHandle<Result<ServeOutcome, std::io::Error>>,
}

#[allow(dead_code)]
impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self, path_and_query: &str) -> String {
        format!("ws://{}{}", self.addr, path_and_query)
    }
}

/// Config for tests: ephemeral port, short drain deadline.
pub fn test_config(secret: &str) -> GatewayConfig {
    GatewayConfig {
        port: 0,
        auth_key: SharedSecret::new(secret).expect("test secret must be non-empty"),
        allowed_origins: AllowedOrigins::Any,
        environment: Environment::Test,
        shutdown: ShutdownConfig { grace_secs: 5 },
        observability: ObservabilityConfig::default(),
        fault_policy: TaskFailurePolicy::Log,
    }
}

/// Start a gateway backed by its own session registry.
#[allow(dead_code)]
pub async fn spawn_gateway(secret: &str) -> TestGateway {
    spawn_with(test_config(secret), None).await
}

/// Start a gateway, optionally substituting the room coordinator.
pub async fn spawn_with(
    config: GatewayConfig,
    rooms_override: Option<Arc<dyn RoomCoordinator>>,
) -> TestGateway {
    let config = Arc::new(config);
    let sessions = Arc::new(SessionRegistry::new());
    let rooms: Arc<dyn RoomCoordinator> = match rooms_override {
        Some(rooms) => rooms,
        None => sessions.clone(),
    };
    let shutdown = Arc::new(Shutdown::new(
        rooms.clone(),
        Duration::from_secs(config.shutdown.grace_secs),
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    let state = AppState {
        config,
        rooms,
        sessions: sessions.clone(),
        shutdown: shutdown.clone(),
        started_at: Instant::now(),
    };

    let server_shutdown = shutdown.clone();
    let server = tokio::spawn(async move {
        HttpServer::new(state).run(listener, server_shutdown).await
    });

    wait_until_healthy(addr).await;

    TestGateway {
        addr,
        shutdown,
        sessions,
        server,
    }
}

async fn wait_until_healthy(addr: SocketAddr) {
    let client = reqwest::Client::new();
    for _ in 0..50 {
        if let Ok(response) = client.get(format!("http://{addr}/health")).send().await {
            if response.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("gateway did not become healthy at {addr}");
}

/// Poll until the predicate holds or the deadline passes.
#[allow(dead_code)]
pub async fn wait_for(mut predicate: impl FnMut() -> bool, deadline: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    predicate()
}

/// Room coordinator that counts `destroy()` calls.
#[derive(Default)]
pub struct CountingCoordinator {
    destroy_calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingCoordinator {
    pub fn destroy_calls(&self) -> usize {
        self.destroy_calls.load(Ordering::SeqCst)
    }
}

impl RoomCoordinator for CountingCoordinator {
    fn stats(&self) -> serde_json::Value {
        serde_json::json!({ "rooms": 0 })
    }

    fn destroy(&self) {
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);
    }
}
