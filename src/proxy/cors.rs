//! CORS policy.
//!
//! The gateway fronts browser callers on a different origin, so every
//! terminal response (relay, 404, 500, preflight) advertises the same
//! fixed policy. Preflight is answered before route classification so
//! it never depends on upstream availability.

use axum::body::Body;
use axum::http::header::{HeaderMap, HeaderValue};
use axum::http::{Response, StatusCode};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Attach the fixed CORS policy headers to a response header map.
pub fn apply(headers: &mut HeaderMap) {
    headers.insert(
        "access-control-allow-origin",
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static(ALLOW_METHODS),
    );
}

/// The preflight short-circuit: 200, empty body, policy headers only.
pub fn preflight_response() -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    apply(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_is_200_empty_with_policy_headers() {
        let response = preflight_response();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], ALLOW_ORIGIN);
        assert_eq!(headers["access-control-allow-headers"], ALLOW_HEADERS);
        assert_eq!(headers["access-control-allow-methods"], ALLOW_METHODS);
    }
}
