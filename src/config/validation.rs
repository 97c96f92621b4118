//! Configuration validation.
//!
//! Semantic checks only; serde already handled the syntax. Every problem is
//! collected so a broken config file can be fixed in one pass.

use std::net::SocketAddr;

use axum::http::HeaderName;

use crate::config::schema::{ApiConfig, FEED_ROUTE, PUBLIC_FEED_ROUTE};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    for (field, path) in [
        ("server.health_path", &config.server.health_path),
        ("server.api_prefix", &config.server.api_prefix),
    ] {
        if !path.starts_with('/') {
            errors.push(ValidationError::new(field, "must start with '/'"));
        } else if path.contains(['{', '}', '*']) {
            errors.push(ValidationError::new(
                field,
                "must be a literal path without '{', '}' or '*'",
            ));
        }
    }

    let health = &config.server.health_path;
    if [FEED_ROUTE, PUBLIC_FEED_ROUTE]
        .iter()
        .any(|route| config.server.api_path(route) == *health)
    {
        errors.push(ValidationError::new(
            "server.health_path",
            format!("'{health}' collides with an API route"),
        ));
    }

    if HeaderName::from_bytes(config.auth.header_name.as_bytes()).is_err() {
        errors.push(ValidationError::new(
            "auth.header_name",
            format!("'{}' is not a valid header name", config.auth.header_name),
        ));
    }

    match url::Url::parse(&config.upstream.base_url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => {}
        Ok(u) => errors.push(ValidationError::new(
            "upstream.base_url",
            format!("unsupported scheme '{}'", u.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("upstream.base_url", e.to_string())),
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.timeout_secs", "must be > 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }
    // A slow upstream must surface as 502, not as the request timeout.
    if config.upstream.timeout_secs >= config.timeouts.request_secs {
        errors.push(ValidationError::new(
            "upstream.timeout_secs",
            format!(
                "must be shorter than timeouts.request_secs ({})",
                config.timeouts.request_secs
            ),
        ));
    }

    if config.database.url.trim().is_empty() {
        errors.push(ValidationError::new("database.url", "must not be empty"));
    }
    if config.database.max_connections == 0 {
        errors.push(ValidationError::new("database.max_connections", "must be > 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
