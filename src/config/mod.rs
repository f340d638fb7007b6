//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → loader.rs (resolve credential values from the environment)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc with every request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Credential values never live in the config file in production;
//!   routes name the environment variable that holds them
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::CredentialConfig;
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::RouteRuleConfig;
