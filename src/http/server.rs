//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the shared application state (feed client, record reader)
//! - Create the Axum router with all handlers
//! - Wire up middleware (CORS, request ID, tracing, timeout, metrics, API key)
//! - Serve until the shutdown signal fires

use std::time::Duration;

use axum::{http::header::InvalidHeaderName, middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::schema::{FEED_ROUTE, PUBLIC_FEED_ROUTE};
use crate::config::validation::validate_config;
use crate::config::{ApiConfig, ConfigError};
use crate::feed::FeedClient;
use crate::http::handlers;
use crate::http::middleware::{require_api_key, ApiKeyGate};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::store::{RecordReader, StoreError};

/// Anything that prevents the server from being assembled.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid auth header name: {0}")]
    HeaderName(#[from] InvalidHeaderName),

    #[error("failed to build upstream client: {0}")]
    UpstreamClient(#[from] reqwest::Error),

    #[error("failed to prepare record store: {0}")]
    Store(#[from] StoreError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub feed: FeedClient,
    pub records: RecordReader,
}

/// HTTP server for the earthquakes API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The store pool connects lazily, so this never touches the network.
    /// The config is validated again here since route registration panics
    /// on malformed paths.
    pub fn new(config: ApiConfig) -> Result<Self, StartupError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let feed = FeedClient::new(&config.upstream)?;
        let records = RecordReader::connect_lazy(&config.database)?;
        let gate = ApiKeyGate::from_config(&config)?;

        if !gate.is_configured() {
            tracing::warn!(
                header = %config.auth.header_name,
                "No API key configured; every protected request will be rejected"
            );
        }

        let state = AppState {
            feed,
            records,
        };

        let router = Self::build_router(&config, gate, state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost first: CORS, request id, trace, timeout,
    /// metrics, API key, then the route.
    #[allow(deprecated)]
    fn build_router(config: &ApiConfig, gate: ApiKeyGate, state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route(&config.server.health_path, get(handlers::health))
            .route(
                &config.server.api_path(FEED_ROUTE),
                get(handlers::get_earthquakes),
            )
            .route(
                &config.server.api_path(PUBLIC_FEED_ROUTE),
                get(handlers::public_earthquakes),
            )
            .method_not_allowed_fallback(handlers::method_not_allowed)
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(middleware::from_fn_with_state(gate, require_api_key))
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
            .layer(cors)
    }

    /// Shared state (feed client, record reader).
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        self.state.records.pool().close().await;
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
