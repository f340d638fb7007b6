//! Outbound URL construction.
//!
//! # Responsibilities
//! - Join the upstream origin with the remainder path
//! - Preserve the caller's query string
//! - Inject the route's credential parameter, overriding any
//!   caller-supplied value of the same name
//!
//! # Design Decisions
//! - Override, not merge: the caller must not be able to forge the
//!   credential by supplying its own copy of the parameter
//! - The credential value exists only on the outbound URL; it is never
//!   logged at info level or echoed in any response

use thiserror::Error;
use url::Url;

use crate::routing::CompiledRule;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("remainder path {path:?} does not join onto {origin}: {source}")]
    BadPath {
        path: String,
        origin: Url,
        source: url::ParseError,
    },
}

/// Build the outbound URL: `upstream_origin + remainder`, original query
/// preserved, credential injected last so it always wins.
pub fn upstream_url(
    rule: &CompiledRule,
    remainder: &str,
    query: Option<&str>,
) -> Result<Url, RewriteError> {
    let mut url = rule
        .upstream_origin
        .join(remainder)
        .map_err(|source| RewriteError::BadPath {
            path: remainder.to_string(),
            origin: rule.upstream_origin.clone(),
            source,
        })?;

    url.set_query(query);

    if let Some(cred) = &rule.credential {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(name, _)| name != cred.param.as_str())
            .map(|(n, v)| (n.into_owned(), v.into_owned()))
            .collect();
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (name, value) in &kept {
            pairs.append_pair(name, value);
        }
        pairs.append_pair(&cred.param, &cred.value);
    }

    Ok(url)
}
