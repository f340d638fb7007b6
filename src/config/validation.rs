//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route prefixes are well-formed and unambiguous
//! - Validate upstream origins parse as bare http(s) origins
//! - Check credentials declare exactly one value source
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("mount_prefix {0:?} must start with '/' and not be '/' alone")]
    BadMountPrefix(String),

    #[error("route {name:?}: prefix {prefix:?} must start with '/' and not be '/' alone")]
    BadPrefix { name: String, prefix: String },

    #[error("route {name:?}: upstream_origin {origin:?} is not a bare http(s) origin: {reason}")]
    BadOrigin {
        name: String,
        origin: String,
        reason: String,
    },

    #[error("route {name:?}: prefix {prefix:?} duplicates route {other:?}")]
    DuplicatePrefix {
        name: String,
        prefix: String,
        other: String,
    },

    #[error("route {name:?} is unreachable: earlier route {other:?} already matches prefix {prefix:?}")]
    ShadowedPrefix {
        name: String,
        prefix: String,
        other: String,
    },

    #[error("route {name:?}: credential {param:?} must set exactly one of `value` / `value_env`")]
    AmbiguousCredential { name: String, param: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.mount_prefix.starts_with('/') || config.mount_prefix.len() < 2 {
        errors.push(ValidationError::BadMountPrefix(config.mount_prefix.clone()));
    }

    for (i, route) in config.routes.iter().enumerate() {
        if !route.prefix.starts_with('/') || route.prefix.len() < 2 {
            errors.push(ValidationError::BadPrefix {
                name: route.name.clone(),
                prefix: route.prefix.clone(),
            });
        }

        match Url::parse(&route.upstream_origin) {
            Ok(url) => {
                let bare = (url.scheme() == "http" || url.scheme() == "https")
                    && url.has_host()
                    && url.path() == "/"
                    && url.query().is_none()
                    && url.fragment().is_none()
                    && !route.upstream_origin.ends_with('/');
                if !bare {
                    errors.push(ValidationError::BadOrigin {
                        name: route.name.clone(),
                        origin: route.upstream_origin.clone(),
                        reason: "expected scheme://authority with no path, query, or fragment"
                            .to_string(),
                    });
                }
            }
            Err(e) => {
                errors.push(ValidationError::BadOrigin {
                    name: route.name.clone(),
                    origin: route.upstream_origin.clone(),
                    reason: e.to_string(),
                });
            }
        }

        // First match wins, so ties and shadowing make later rules dead.
        for earlier in &config.routes[..i] {
            if earlier.prefix == route.prefix {
                errors.push(ValidationError::DuplicatePrefix {
                    name: route.name.clone(),
                    prefix: route.prefix.clone(),
                    other: earlier.name.clone(),
                });
            } else if route.prefix.starts_with(&earlier.prefix) {
                errors.push(ValidationError::ShadowedPrefix {
                    name: route.name.clone(),
                    prefix: route.prefix.clone(),
                    other: earlier.name.clone(),
                });
            }
        }

        if let Some(cred) = &route.credential {
            if cred.value.is_some() == cred.value_env.is_some() {
                errors.push(ValidationError::AmbiguousCredential {
                    name: route.name.clone(),
                    param: cred.name.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
