//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("route {route:?}: credential environment variable {var:?} is not set")]
    MissingCredentialEnv { route: String, var: String },
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, resolving
/// environment-sourced credential values in place.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    resolve_credentials(config)
}

/// Replace every `value_env` credential source with the variable's
/// current value. Resolution happens exactly once, at load time; the
/// returned config is immutable for the life of the process.
pub fn resolve_credentials(mut config: GatewayConfig) -> Result<GatewayConfig, ConfigError> {
    for route in &mut config.routes {
        if let Some(cred) = &mut route.credential {
            if let Some(var) = cred.value_env.take() {
                let value = std::env::var(&var).map_err(|_| ConfigError::MissingCredentialEnv {
                    route: route.name.clone(),
                    var: var.clone(),
                })?;
                cred.value = Some(value);
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CredentialConfig, RouteRuleConfig};

    #[test]
    fn resolves_env_credentials_at_load() {
        std::env::set_var("EDGE_GATEWAY_TEST_UID", "tenant-42");

        let mut config = GatewayConfig::default();
        config.routes.push(RouteRuleConfig {
            name: "crm".into(),
            prefix: "/branch/all".into(),
            upstream_origin: "https://crm.example.com".into(),
            credential: Some(CredentialConfig {
                name: "uid".into(),
                value: None,
                value_env: Some("EDGE_GATEWAY_TEST_UID".into()),
            }),
        });

        let resolved = resolve_credentials(config).unwrap();
        let cred = resolved.routes[0].credential.as_ref().unwrap();
        assert_eq!(cred.value.as_deref(), Some("tenant-42"));
        assert!(cred.value_env.is_none());
    }

    #[test]
    fn missing_env_var_is_a_load_error() {
        let mut config = GatewayConfig::default();
        config.routes.push(RouteRuleConfig {
            name: "crm".into(),
            prefix: "/branch/all".into(),
            upstream_origin: "https://crm.example.com".into(),
            credential: Some(CredentialConfig {
                name: "uid".into(),
                value: None,
                value_env: Some("EDGE_GATEWAY_TEST_UNSET".into()),
            }),
        });

        let err = resolve_credentials(config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentialEnv { .. }));
    }

    #[test]
    fn parses_minimal_toml() {
        let toml = r#"
            mount_prefix = "/proxy"

            [[routes]]
            name = "crm-branches"
            prefix = "/branch/all"
            upstream_origin = "https://crm.example.com"
            credential = { name = "uid", value = "u-1" }
        "#;
        let config: GatewayConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].prefix, "/branch/all");
        assert!(validate_config(&config).is_ok());
    }
}
