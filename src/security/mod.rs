//! Authentication and cross-origin policy.
//!
//! # Data Flow
//! ```text
//! connection attempt
//!     → candidates extracted (Authorization header, auth query param)
//!     → gate.rs decides accept/reject (pure, constant-time)
//!     → caller enforces: 401 response or handshake denial
//! ```
//!
//! # Design Decisions
//! - The gate is a pure function of one request plus the immutable config
//! - HTTP introspection accepts the header candidate only; the upgrade path
//!   also accepts the query fallback for clients that cannot set headers
//! - Rejections are opaque: no partial-match information leaves the process

pub mod cors;
pub mod gate;
pub mod middleware;

pub use gate::{authenticate, AuthDecision, CredentialCandidate, CredentialSource};
