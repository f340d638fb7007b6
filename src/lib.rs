//! Edge Gateway Library
//!
//! An allow-list HTTP proxy that terminates CORS preflight, rewrites
//! public paths onto configured upstream origins, injects server-held
//! credentials, and relays upstream responses verbatim.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
