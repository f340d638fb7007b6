//! Proxy pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest
//!     → cors.rs (OPTIONS short-circuits to the preflight response)
//!     → [routing classifies the remainder path]
//!     → rewrite.rs (upstream URL + credential injection)
//!     → headers.rs (hop-by-hop header removal)
//!     → dispatch.rs (the one network I/O call, bounded timeout)
//!     → relay.rs (terminal response, CORS on every exit)
//! ```
//!
//! # Design Decisions
//! - Every stage except dispatch is a pure transformation
//! - Exactly one upstream attempt per invocation; no retries
//! - Upstream bodies are opaque bytes, never re-parsed or re-encoded
//! - Every terminal response carries the CORS headers, so failures stay
//!   consumable by browser fetch calls

pub mod cors;
pub mod dispatch;
pub mod headers;
pub mod relay;
pub mod rewrite;

pub use dispatch::{DispatchError, UpstreamResponse};
