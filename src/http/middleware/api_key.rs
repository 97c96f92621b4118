//! API key middleware.
//! Enforces the shared-secret header on every route except the health
//! check and CORS pre-flight requests.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::InvalidHeaderName, HeaderName, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::config::ApiConfig;
use crate::http::error::ApiError;
use crate::observability::metrics;

/// Gate state, built once at startup and shared read-only.
#[derive(Clone)]
pub struct ApiKeyGate {
    header: HeaderName,
    expected: Option<Arc<str>>,
    health_path: Arc<str>,
}

impl ApiKeyGate {
    pub fn new(header: HeaderName, expected: Option<&str>, health_path: &str) -> Self {
        Self {
            header,
            expected: expected.filter(|k| !k.is_empty()).map(Arc::from),
            health_path: Arc::from(health_path),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, InvalidHeaderName> {
        let header = HeaderName::from_bytes(config.auth.header_name.as_bytes())?;
        Ok(Self::new(
            header,
            config.auth.expected_key(),
            &config.server.health_path,
        ))
    }

    /// Whether the gate is configured to let anything through at all.
    pub fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    /// Requests that bypass the check entirely.
    pub fn is_exempt(&self, method: &Method, path: &str) -> bool {
        method == Method::OPTIONS || path == &*self.health_path
    }

    /// Byte-exact, constant-time comparison. No expected key means no
    /// request is ever authorized.
    pub fn is_authorized(&self, presented: Option<&[u8]>) -> bool {
        match (self.expected.as_deref(), presented) {
            (Some(expected), Some(presented)) => {
                let expected = expected.as_bytes();
                expected.len() == presented.len() && bool::from(expected.ct_eq(presented))
            }
            _ => false,
        }
    }
}

pub async fn require_api_key(
    State(gate): State<ApiKeyGate>,
    request: Request,
    next: Next,
) -> Response {
    if gate.is_exempt(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    let presented = request.headers().get(&gate.header).map(|v| v.as_bytes());
    if gate.is_authorized(presented) {
        return next.run(request).await;
    }

    // Never log the presented value.
    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        header_present = presented.is_some(),
        "Rejected unauthorized request"
    );
    metrics::record_auth_rejection();
    ApiError::Unauthorized.into_response()
}
