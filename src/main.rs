//! Earthquakes API server.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                EARTHQUAKES API               │
//!                        │                                              │
//!   Client Request       │  ┌────────┐   ┌──────────┐   ┌───────────┐   │
//!   ─────────────────────┼─▶│  CORS  │──▶│ API key  │──▶│  router   │   │
//!                        │  │ req-id │   │   gate   │   └─────┬─────┘   │
//!                        │  └────────┘   └──────────┘         │         │
//!                        │                        ┌───────────┴───────┐ │
//!                        │                        ▼                   ▼ │
//!                        │                 ┌────────────┐   ┌─────────┐ │
//!                        │                 │ feed proxy │   │ records │ │
//!                        │                 └─────┬──────┘   └────┬────┘ │
//!                        └───────────────────────┼───────────────┼──────┘
//!                                                ▼               ▼
//!                                           USGS feed        database
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use earthquakes_api::config::load_config;
use earthquakes_api::observability::{logging, metrics};
use earthquakes_api::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "earthquakes-api")]
#[command(about = "Earthquake records API and USGS feed proxy", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long, env = "EARTHQUAKES_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    logging::init_tracing(&config.observability);

    tracing::info!("{} v{} starting", config.server.title, env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        api_key_configured = config.auth.expected_key().is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let run_migrations = config.database.run_migrations;
    let server = HttpServer::new(config)?;

    if run_migrations {
        server.state().records.migrate().await?;
        tracing::info!("Database migrations applied");
    }

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    shutdown.trigger_on_signal();

    server.run(listener, rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
