//! Real-Time Room Gateway
//!
//! A connection gateway built with Tokio and Axum. It terminates inbound
//! HTTP and WebSocket connections, authenticates every attempt against a
//! shared secret, and owns the process lifecycle. Room semantics live
//! behind the `RoomCoordinator` boundary.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌───────────────────────────────────────────────┐
//!                   │                 ROOM GATEWAY                  │
//!                   │                                               │
//!   HTTP request    │  ┌─────────┐   ┌───────────────────────────┐  │
//!   ────────────────┼─▶│  http   │──▶│ /        /health  /stats  │  │
//!                   │  │ server  │   │ (stats behind bearer gate)│  │
//!                   │  └────┬────┘   └───────────────────────────┘  │
//!                   │       │                                       │
//!   WS handshake    │       ▼                ┌──────────────┐       │
//!   ────────────────┼─▶ upgrade gate ───────▶│   rooms      │       │
//!                   │   (header/query auth)  │  registry    │       │
//!                   │                        └──────────────┘       │
//!                   │                                               │
//!                   │  ┌─────────────────────────────────────────┐  │
//!                   │  │          Cross-Cutting Concerns          │  │
//!                   │  │  ┌────────┐ ┌──────────┐ ┌────────────┐ │  │
//!                   │  │  │ config │ │ security │ │observability│ │  │
//!                   │  │  └────────┘ └──────────┘ └────────────┘ │  │
//!                   │  │  ┌─────────────────────────────────────┐ │  │
//!                   │  │  │   lifecycle: signals/faults/drain    │ │  │
//!                   │  │  └─────────────────────────────────────┘ │  │
//!                   │  └─────────────────────────────────────────┘  │
//!                   └───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod rooms;
pub mod security;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::{AppState, HttpServer, ServeOutcome};
pub use lifecycle::Shutdown;
pub use rooms::{RoomCoordinator, SessionRegistry};
