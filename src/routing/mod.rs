//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → strip the gateway mount prefix
//!     → classifier.rs (ordered prefix scan over the allow-list)
//!     → Return: matched rule or explicit no-match
//!
//! Route Compilation (at startup):
//!     RouteRuleConfig[]
//!     → parse upstream origins
//!     → freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in the hot path (prefix matching only)
//! - First match wins; validation guarantees no ties
//! - Explicit no-match rather than a silent default: the gateway is an
//!   allow-list, never an open proxy

pub mod classifier;

pub use classifier::{CompiledRule, Credential, RouteTable};
