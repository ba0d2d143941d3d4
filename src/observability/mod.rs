//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; requests are logged by the HTTP trace
//!   layer, upgrade attempts by the gate with masked outcomes only
//! - Metric updates are cheap atomic operations; exposition is opt-in and
//!   lives on a separate bind address
//! - Credential values never reach a log line or a metric label

pub mod logging;
pub mod metrics;
