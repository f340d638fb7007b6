//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling produces:
//!     → tracing spans/events (structured fields, request IDs)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metric updates are cheap (atomic increments)
//! - Labels: method, route name, status code
//! - Upstream failure detail is logged server-side only; callers never
//!   see it

pub mod metrics;
