//! Upstream dispatch: the single network I/O call per invocation.
//!
//! # Responsibilities
//! - Issue exactly one outbound request (no retries, no fallbacks)
//! - Attach the body only for methods that carry one
//! - Bound the call with connect/request timeouts from configuration
//! - Convert every network-level failure into a typed DispatchError
//!
//! # Design Decisions
//! - `Result<UpstreamResponse, DispatchError>` instead of a catch-all:
//!   the 500-on-any-failure behavior is an explicit, testable branch
//! - The upstream body is buffered as opaque bytes; the gateway never
//!   interprets payloads
//! - The future runs on the inbound request task, so dropping the
//!   inbound connection cancels the upstream call

use axum::body::Bytes;
use axum::http::header::{HeaderMap, HeaderValue};
use axum::http::{Method, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::schema::TimeoutConfig;

/// What the relay needs from an upstream response: status, the one
/// propagated header, and the raw body.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// Network-level failure reaching the upstream. Detail is logged
/// server-side only; callers see the fixed 500 payload.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl DispatchError {
    /// True when the failure was the bounded timeout firing.
    pub fn is_timeout(&self) -> bool {
        match self {
            DispatchError::Request(e) => e.is_timeout(),
        }
    }
}

/// Build the shared upstream client with bounded timeouts. Constructed
/// once at startup; `reqwest::Client` is internally pooled and cheap to
/// clone into handlers.
pub fn build_client(timeouts: &TimeoutConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(timeouts.connect_secs))
        .timeout(std::time::Duration::from_secs(timeouts.request_secs))
        .build()
}

/// Forward one request upstream. Body is attached iff the method allows
/// one; GET and HEAD never forward a body even when the inbound request
/// carried one.
pub async fn dispatch(
    client: &reqwest::Client,
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
) -> Result<UpstreamResponse, DispatchError> {
    let mut request = client.request(method.clone(), url).headers(headers);

    if let Some(body) = body {
        if method_allows_body(&method) {
            request = request.body(body);
        }
    }

    let response = request.send().await?;

    let status = response.status();
    let content_type = response.headers().get("content-type").cloned();
    let body = response.bytes().await?;

    Ok(UpstreamResponse {
        status,
        content_type,
        body,
    })
}

/// GET and HEAD never carry a forwarded body.
pub fn method_allows_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_head_never_carry_a_body() {
        assert!(!method_allows_body(&Method::GET));
        assert!(!method_allows_body(&Method::HEAD));
        assert!(method_allows_body(&Method::POST));
        assert!(method_allows_body(&Method::PUT));
        assert!(method_allows_body(&Method::DELETE));
        assert!(method_allows_body(&Method::PATCH));
    }
}
