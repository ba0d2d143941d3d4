//! Configuration loading from the environment.

use std::collections::HashMap;
use std::env;

use thiserror::Error;

use crate::config::schema::{
    AllowedOrigins, Environment, GatewayConfig, ObservabilityConfig, SharedSecret, ShutdownConfig,
    TaskFailurePolicy,
};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The variable is unset or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// The variable is set but does not parse.
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Load and validate configuration from the process environment.
pub fn from_env() -> Result<GatewayConfig, ConfigError> {
    from_vars(&env::vars().collect())
}

/// Load configuration from a map of variables.
///
/// Split out from [`from_env`] so tests can exercise the loader without
/// touching the process environment.
pub fn from_vars(vars: &HashMap<String, String>) -> Result<GatewayConfig, ConfigError> {
    let port = match vars.get("PORT") {
        Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
            var: "PORT",
            value: raw.clone(),
            reason: e.to_string(),
        })?,
        None => 3001,
    };

    // An empty AUTH_KEY is treated the same as an unset one. The gateway must
    // never start with a secret an empty token could match.
    let auth_key = vars
        .get("AUTH_KEY")
        .and_then(|raw| SharedSecret::new(raw.clone()))
        .ok_or(ConfigError::MissingVar("AUTH_KEY"))?;

    let allowed_origins = vars
        .get("ALLOWED_ORIGINS")
        .map(|raw| AllowedOrigins::parse(raw))
        .unwrap_or_default();

    let environment = vars
        .get("ENVIRONMENT")
        .map(|raw| Environment::parse(raw))
        .unwrap_or_default();

    let grace_secs = match vars.get("SHUTDOWN_GRACE_SECS") {
        Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidVar {
            var: "SHUTDOWN_GRACE_SECS",
            value: raw.clone(),
            reason: e.to_string(),
        })?,
        None => ShutdownConfig::default().grace_secs,
    };

    let fault_policy = match vars.get("FAULT_POLICY").map(String::as_str) {
        None => TaskFailurePolicy::default(),
        Some("log") => TaskFailurePolicy::Log,
        Some("shutdown") => TaskFailurePolicy::Shutdown,
        Some(other) => {
            return Err(ConfigError::InvalidVar {
                var: "FAULT_POLICY",
                value: other.to_string(),
                reason: "expected \"log\" or \"shutdown\"".to_string(),
            })
        }
    };

    let metrics_enabled = match vars.get("METRICS_ENABLED").map(String::as_str) {
        None => ObservabilityConfig::default().metrics_enabled,
        Some("1") | Some("true") => true,
        Some("0") | Some("false") => false,
        Some(other) => {
            return Err(ConfigError::InvalidVar {
                var: "METRICS_ENABLED",
                value: other.to_string(),
                reason: "expected a boolean".to_string(),
            })
        }
    };

    let metrics_address = vars
        .get("METRICS_ADDRESS")
        .cloned()
        .unwrap_or_else(|| ObservabilityConfig::default().metrics_address);

    Ok(GatewayConfig {
        port,
        auth_key,
        allowed_origins,
        environment,
        shutdown: ShutdownConfig { grace_secs },
        observability: ObservabilityConfig {
            metrics_enabled,
            metrics_address,
        },
        fault_policy,
    })
}
