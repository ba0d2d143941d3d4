//! Configuration schema definitions.
//!
//! The full configuration is resolved once at startup from environment
//! variables (see `loader`) and shared via `Arc` afterwards. Nothing in the
//! gateway mutates it.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Root configuration for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// TCP port the gateway listens on.
    pub port: u16,

    /// Shared secret every client must present.
    pub auth_key: SharedSecret,

    /// Origins allowed to complete the CORS handshake and the upgrade.
    pub allowed_origins: AllowedOrigins,

    /// Deployment environment name.
    pub environment: Environment,

    /// Shutdown behavior.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// What to do when a supervised background task fails.
    pub fault_policy: TaskFailurePolicy,
}

impl GatewayConfig {
    /// Address the listener binds to.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port)
    }
}

/// The pre-configured token all clients must present.
///
/// Wrapped so the raw value never ends up in `Debug` output or logs.
#[derive(Clone)]
pub struct SharedSecret(String);

impl SharedSecret {
    /// Build a secret from a non-empty string.
    ///
    /// Returns `None` for the empty string, which the loader treats the same
    /// as an unset variable.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Access the raw secret for comparison.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(****)")
    }
}

/// Origins allowed to reach the gateway from a browser.
#[derive(Debug, Clone, Default)]
pub enum AllowedOrigins {
    /// Any origin.
    #[default]
    Any,
    /// An explicit allowlist of origins.
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Parse the `ALLOWED_ORIGINS` value: `*` means any, otherwise a
    /// comma-separated allowlist. Blank entries are dropped.
    pub fn parse(raw: &str) -> Self {
        let entries: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        if entries.is_empty() || entries.iter().any(|e| e == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(entries)
        }
    }

    /// Whether the given request origin may connect.
    pub fn permits(&self, origin: &str) -> bool {
        match self {
            AllowedOrigins::Any => true,
            AllowedOrigins::List(list) => list.iter().any(|allowed| allowed == origin),
        }
    }
}

/// Deployment environment, from `ENVIRONMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// Unrecognized names fall back to development.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "test" => Environment::Test,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

/// Shutdown configuration.
#[derive(Debug, Clone)]
pub struct ShutdownConfig {
    /// How long draining may take before the process force-exits.
    pub grace_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { grace_secs: 10 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus exposition endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Policy applied when a supervised background task fails.
///
/// Task failures are recoverable by default: they are logged and the process
/// keeps running. `Shutdown` escalates them to a full drain instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFailurePolicy {
    #[default]
    Log,
    Shutdown,
}
