//! Terminal response construction.
//!
//! # Responsibilities
//! - Relay upstream responses: status unchanged, content-type copied iff
//!   present, body bytes untouched
//! - Synthesize the fixed 404 (no matching route) and 500 (dispatch
//!   failure) payloads
//! - Attach the CORS policy to every exit
//!
//! # Design Decisions
//! - Non-2xx upstream statuses are relayed, never translated: an
//!   upstream application error is not a gateway error
//! - Synthesized bodies are fixed JSON, stable regardless of the
//!   underlying failure, so upstream internals never leak to callers

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Response, StatusCode};

use crate::proxy::cors;
use crate::proxy::dispatch::UpstreamResponse;

/// Relay an upstream response verbatim with CORS attached.
pub fn relay(upstream: UpstreamResponse) -> Response<Body> {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    if let Some(content_type) = upstream.content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    cors::apply(response.headers_mut());
    response
}

/// The allow-list rejection: no configured route matched.
pub fn route_not_proxied() -> Response<Body> {
    synthesized(StatusCode::NOT_FOUND, "Route not proxied")
}

/// The opaque dispatch failure: upstream unreachable, timed out, or the
/// invocation could not be completed.
pub fn proxy_failed() -> Response<Body> {
    synthesized(StatusCode::INTERNAL_SERVER_ERROR, "Proxy failed")
}

fn synthesized(status: StatusCode, message: &str) -> Response<Body> {
    let body = serde_json::json!({ "error": message }).to_string();
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        axum::http::header::HeaderValue::from_static("application/json"),
    );
    cors::apply(response.headers_mut());
    response
}
