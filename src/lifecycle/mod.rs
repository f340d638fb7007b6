//! Process lifecycle subsystem.
//!
//! # Design Decisions
//! - One broadcast channel fans the shutdown signal out to every
//!   long-running task
//! - The server drains in-flight requests before exiting (graceful)

pub mod shutdown;

pub use shutdown::Shutdown;
