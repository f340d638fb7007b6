//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with catch-all routes
//! - Wire up middleware (request ID, tracing, inbound timeout)
//! - Bind the server to a listener with graceful shutdown
//! - Orchestrate the proxy pipeline per request:
//!   preflight → classify → rewrite → sanitize → dispatch → relay

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::{self, Next},
    response::Response,
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::net::BoundedListener;
use crate::observability::metrics;
use crate::proxy::{cors, dispatch, headers, relay, rewrite};
use crate::routing::RouteTable;

/// Startup failure while wiring the server together.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("route table compilation failed: {0}")]
    Routes(#[from] url::ParseError),

    #[error("upstream client construction failed: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers. Immutable after startup;
/// safe for unsynchronized concurrent reads.
#[derive(Clone)]
struct AppState {
    routes: Arc<RouteTable>,
    client: reqwest::Client,
    max_body_size: usize,
}

/// HTTP server for the edge gateway.
pub struct HttpServer {
    router: Router,
    max_connections: usize,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let routes = Arc::new(RouteTable::from_config(&config)?);
        let client = dispatch::build_client(&config.timeouts)?;

        let state = AppState {
            routes,
            client,
            max_body_size: config.limits.max_body_size,
        };

        Ok(Self {
            max_connections: config.listener.max_connections,
            router: Self::build_router(&config, state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        // The inbound guard sits above the dispatch timeout so upstream
        // stalls surface as the fixed 500, not a middleware 408.
        let inbound_timeout = Duration::from_secs(config.timeouts.request_secs + 1);

        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http())
                    .layer(middleware::from_fn(cors_on_every_response))
                    .layer(TimeoutLayer::new(inbound_timeout)),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_connections = self.max_connections,
            "HTTP server starting"
        );

        let listener = BoundedListener::new(listener, self.max_connections);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Responses synthesized below the handler (the inbound timeout guard's
/// 408) bypass the relay, so the CORS policy is re-applied here on every
/// exit. Insertion is idempotent for responses that already carry it.
async fn cors_on_every_response(request: Request<Body>, next: Next) -> Response<Body> {
    let mut response = next.run(request).await;
    cors::apply(response.headers_mut());
    response
}

/// Main gateway handler.
///
/// Every exit path carries the CORS policy headers; each invocation
/// resolves to exactly one terminal response and makes at most one
/// upstream attempt.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let start = Instant::now();
    let method = request.method().clone();
    let method_str = method.to_string();
    let path = request.uri().path().to_string();

    // Preflight short-circuits before classification so it never
    // depends on route configuration or upstream availability.
    if method == Method::OPTIONS {
        metrics::record_request(&method_str, "preflight", 200, start);
        return cors::preflight_response();
    }

    let Some(remainder) = state.routes.strip_mount(&path) else {
        tracing::warn!(method = %method, path = %path, "Path outside gateway mount");
        metrics::record_request(&method_str, "none", 404, start);
        return relay::route_not_proxied();
    };

    let Some(rule) = state.routes.classify(remainder) else {
        tracing::warn!(method = %method, path = %path, "Route not proxied");
        metrics::record_request(&method_str, "none", 404, start);
        return relay::route_not_proxied();
    };

    let url = match rewrite::upstream_url(rule, remainder, request.uri().query()) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(route = %rule.name, error = %e, "Rewrite failed");
            metrics::record_request(&method_str, &rule.name, 500, start);
            return relay::proxy_failed();
        }
    };

    tracing::debug!(
        method = %method,
        route = %rule.name,
        upstream = %url.host_str().unwrap_or("-"),
        "Proxying request"
    );

    let outbound_headers = headers::sanitize(request.headers());

    // Buffer the body only for methods that forward one; GET/HEAD drop
    // the inbound body entirely.
    let body = if dispatch::method_allows_body(&method) {
        match axum::body::to_bytes(request.into_body(), state.max_body_size).await {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            Ok(_) => None,
            Err(e) => {
                tracing::error!(route = %rule.name, error = %e, "Failed to read inbound body");
                metrics::record_request(&method_str, &rule.name, 500, start);
                return relay::proxy_failed();
            }
        }
    } else {
        None
    };

    match dispatch::dispatch(&state.client, method, url, outbound_headers, body).await {
        Ok(upstream) => {
            let status = upstream.status.as_u16();
            tracing::debug!(route = %rule.name, status, "Relaying upstream response");
            metrics::record_request(&method_str, &rule.name, status, start);
            relay::relay(upstream)
        }
        Err(e) => {
            tracing::error!(
                route = %rule.name,
                error = %e,
                timeout = e.is_timeout(),
                "Upstream dispatch failed"
            );
            metrics::record_upstream_failure(&rule.name);
            metrics::record_request(&method_str, &rule.name, 500, start);
            relay::proxy_failed()
        }
    }
}
