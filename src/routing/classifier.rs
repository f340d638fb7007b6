//! Route classification.
//!
//! # Responsibilities
//! - Strip the fixed gateway mount prefix from inbound paths
//! - Match the remainder against the ordered allow-list (first match wins)
//! - Return the matched rule or an explicit no-match
//!
//! # Design Decisions
//! - Path matching is case-sensitive string prefix matching
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan (route counts here are single digits)

use url::Url;

use crate::config::schema::{GatewayConfig, RouteRuleConfig};

/// A server-held credential injected as a query parameter.
#[derive(Debug, Clone)]
pub struct Credential {
    pub param: String,
    pub value: String,
}

/// A route rule compiled for matching: prefix, parsed origin, resolved
/// credential.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub prefix: String,
    pub upstream_origin: Url,
    pub credential: Option<Credential>,
}

/// The immutable allow-list, compiled once at startup.
#[derive(Debug)]
pub struct RouteTable {
    mount_prefix: String,
    rules: Vec<CompiledRule>,
}

impl RouteTable {
    /// Compile the route table from validated, credential-resolved
    /// configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, url::ParseError> {
        let rules = config
            .routes
            .iter()
            .map(compile_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            mount_prefix: config.mount_prefix.clone(),
            rules,
        })
    }

    /// Strip the mount prefix from an inbound path. Paths outside the
    /// mount are treated as no-match by the caller.
    pub fn strip_mount<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(self.mount_prefix.as_str())
    }

    /// First rule whose prefix is a prefix of the remainder path.
    /// An empty remainder (request to the mount root) never matches.
    pub fn classify(&self, remainder: &str) -> Option<&CompiledRule> {
        if remainder.is_empty() {
            return None;
        }
        self.rules.iter().find(|r| remainder.starts_with(&r.prefix))
    }
}

fn compile_rule(rule: &RouteRuleConfig) -> Result<CompiledRule, url::ParseError> {
    let credential = rule.credential.as_ref().and_then(|c| {
        c.value.as_ref().map(|v| Credential {
            param: c.name.clone(),
            value: v.clone(),
        })
    });
    Ok(CompiledRule {
        name: rule.name.clone(),
        prefix: rule.prefix.clone(),
        upstream_origin: Url::parse(&rule.upstream_origin)?,
        credential,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::GatewayConfig;

    fn table(prefixes: &[&str]) -> RouteTable {
        let mut config = GatewayConfig::default();
        for (i, p) in prefixes.iter().enumerate() {
            config.routes.push(RouteRuleConfig {
                name: format!("r{i}"),
                prefix: (*p).to_string(),
                upstream_origin: "https://crm.example.com".to_string(),
                credential: None,
            });
        }
        RouteTable::from_config(&config).unwrap()
    }

    #[test]
    fn first_match_wins() {
        let table = table(&["/branch/all", "/product/achieve-courses"]);
        assert_eq!(table.classify("/branch/all").unwrap().name, "r0");
        assert_eq!(
            table.classify("/product/achieve-courses/12").unwrap().name,
            "r1"
        );
        assert!(table.classify("/secret/endpoint").is_none());
    }

    #[test]
    fn prefix_match_covers_subpaths() {
        let table = table(&["/branch"]);
        assert!(table.classify("/branch/all").is_some());
        assert!(table.classify("/branches").is_some()); // string prefix, by contract
        assert!(table.classify("/bran").is_none());
    }

    #[test]
    fn mount_root_never_matches() {
        let table = table(&["/branch/all"]);
        assert!(table.classify("").is_none());
    }

    #[test]
    fn strip_mount_rejects_foreign_paths() {
        let table = table(&["/branch/all"]);
        assert_eq!(table.strip_mount("/proxy/branch/all"), Some("/branch/all"));
        assert_eq!(table.strip_mount("/proxy"), Some(""));
        assert_eq!(table.strip_mount("/other/branch/all"), None);
    }
}
