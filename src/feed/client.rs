//! Outbound client for the public earthquake feed.

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::feed::filter::FilterSelection;
use crate::feed::FeedError;
use crate::observability::metrics;

/// Why a fetch failed. Logged server-side, never returned to callers.
#[derive(Debug, thiserror::Error)]
enum FetchFailure {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Resolves filter codes into a live feed document.
///
/// One attempt per call, no caching. Cloning is cheap: the underlying
/// connection pool is shared.
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// Build a client with the configured timeout and identifying header.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Validate raw caller codes, then fetch the matching document.
    ///
    /// Invalid codes fail before any network I/O.
    pub async fn resolve(&self, timebox: &str, magnitude: &str) -> Result<Value, FeedError> {
        let selection = FilterSelection::parse(timebox, magnitude)?;
        self.fetch(selection).await
    }

    /// Fetch the document for an already validated selection.
    pub async fn fetch(&self, selection: FilterSelection) -> Result<Value, FeedError> {
        let url = self.url_for(&selection);
        let start = Instant::now();

        match self.fetch_document(&url).await {
            Ok(document) => {
                tracing::debug!(
                    url = %url,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream feed fetched"
                );
                metrics::record_upstream_fetch("ok", start);
                Ok(document)
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Upstream feed unavailable");
                metrics::record_upstream_fetch("error", start);
                Err(FeedError::Unavailable)
            }
        }
    }

    /// Upstream URL for a selection.
    pub fn url_for(&self, selection: &FilterSelection) -> String {
        selection.url(&self.base_url)
    }

    async fn fetch_document(&self, url: &str) -> Result<Value, FetchFailure> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
