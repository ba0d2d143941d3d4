//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (resolve & validate)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - A missing or empty AUTH_KEY is fatal before the listener binds
//! - Every other field has a default so a minimal environment works

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::{
    AllowedOrigins, Environment, GatewayConfig, ObservabilityConfig, SharedSecret, ShutdownConfig,
    TaskFailurePolicy,
};
