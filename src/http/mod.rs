//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout)
//!     → gateway_handler (preflight / classify / rewrite / sanitize /
//!       dispatch / relay)
//!     → Send to client
//! ```

pub mod server;

pub use server::HttpServer;
