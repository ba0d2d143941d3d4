//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     First signal/fault → destroy room coordinator → broadcast drain
//!     → stop accepting, finish in-flight work → listener closed
//!     → forced deadline wins instead if draining takes too long
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Shutdown::begin (later signals no-op)
//!
//! Faults (fault.rs):
//!     Uncaught panic → Shutdown::begin
//!     Supervised task failure → log, or drain under FAULT_POLICY=shutdown
//! ```
//!
//! # Design Decisions
//! - Exactly one shutdown sequence ever runs; the transition is a one-shot
//!   compare-and-swap, not a flag checked from several handlers
//! - The coordinator is destroyed before the listener starts closing
//! - The forced deadline bounds draining; the process never hangs on exit

pub mod fault;
pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownReason, ShutdownState};
