//! Header sanitization.
//!
//! # Responsibilities
//! - Drop headers that describe the inbound transport leg and would
//!   corrupt the outbound connection
//! - Pass everything else through unchanged and uninspected
//!
//! # Design Decisions
//! - Pure function over a copy of the inbound map
//! - Exclusion is a constant set; header names are matched
//!   case-insensitively (HeaderName is already lowercase)
//! - No content inspection: Authorization and custom headers flow as-is

use axum::http::header::HeaderMap;

/// Hop-by-hop headers set by the receiving transport. `content-length`
/// is excluded because the client recomputes framing from the forwarded
/// body (which may be dropped for GET/HEAD).
const EXCLUDED_HEADERS: [&str; 3] = ["host", "connection", "content-length"];

/// Copy the inbound headers minus the exclusion set.
pub fn sanitize(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if EXCLUDED_HEADERS.contains(&name.as_str()) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
    outbound
}
