//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, connection limits).
    pub listener: ListenerConfig,

    /// Fixed path prefix the gateway is mounted under. Everything after
    /// it is the remainder path used for route matching.
    #[serde(default = "default_mount_prefix")]
    pub mount_prefix: String,

    /// Allow-list of proxyable routes, checked in order.
    pub routes: Vec<RouteRuleConfig>,

    /// Timeout configuration for the upstream dispatcher.
    pub timeouts: TimeoutConfig,

    /// Request body limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

fn default_mount_prefix() -> String {
    "/proxy".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            mount_prefix: default_mount_prefix(),
            routes: Vec::new(),
            timeouts: TimeoutConfig::default(),
            limits: LimitsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// A single allow-listed route: a remainder-path prefix mapped to an
/// upstream origin, with an optional injected query-parameter credential.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteRuleConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// Remainder-path prefix to match (e.g., "/branch/all").
    pub prefix: String,

    /// Upstream origin to forward to (scheme + authority, no path).
    pub upstream_origin: String,

    /// Optional query-parameter credential injected into every
    /// forwarded request on this route.
    #[serde(default)]
    pub credential: Option<CredentialConfig>,
}

/// A server-held credential injected as a query parameter. The value is
/// never exposed to callers; it exists only on the outbound request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialConfig {
    /// Query parameter name (e.g., "uid").
    pub name: String,

    /// Literal value. Intended for tests; production configs should use
    /// `value_env`.
    #[serde(default)]
    pub value: Option<String>,

    /// Environment variable holding the value, resolved once at load.
    #[serde(default)]
    pub value_env: Option<String>,
}

/// Timeout configuration for the upstream dispatcher.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Request body limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes. Bodies are buffered before
    /// forwarding, so this bounds per-request memory.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
