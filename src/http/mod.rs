//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → handlers.rs (/, /health, /stats)
//!     → websocket.rs (upgrade gate → session → room coordinator)
//! ```

pub mod handlers;
pub mod server;
pub mod websocket;

pub use server::{AppState, HttpServer, ServeOutcome};
