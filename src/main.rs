//! Edge Gateway
//!
//! An HTTP edge proxy built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 EDGE GATEWAY                  │
//!                    │                                               │
//!   Client Request   │  ┌────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ routing  │──▶│   proxy   │  │
//!                    │  │ server │   │classifier│   │ pipeline  │  │
//!                    │  └────────┘   └──────────┘   └─────┬─────┘  │
//!                    │                                     │        │
//!   Client Response  │  ┌────────┐                   ┌─────▼─────┐ │
//!   ◀────────────────┼──│ relay  │◀──────────────────│ dispatch  │◀┼── Upstream
//!                    │  └────────┘                   └───────────┘ │    Origin
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐ │
//!                    │  │         Cross-Cutting Concerns           │ │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                    │  │  │ config │ │observability│ │lifecycle│ │ │
//!                    │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edge_gateway::config::loader::load_config;
use edge_gateway::http::HttpServer;
use edge_gateway::lifecycle::Shutdown;

/// Edge gateway: allow-list proxy with CORS termination and
/// credential injection.
#[derive(Debug, Parser)]
#[command(name = "edge-gateway", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "gateway.toml")]
    config: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edge_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("edge-gateway v0.1.0 starting");

    let config = load_config(&cli.config)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        mount_prefix = %config.mount_prefix,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            edge_gateway::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Trigger graceful shutdown on Ctrl+C
    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            trigger.trigger();
        }
    });

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
