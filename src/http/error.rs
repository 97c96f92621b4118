//! Caller-visible error taxonomy.
//!
//! Every failure leaving a handler or middleware goes through [`ApiError`],
//! so the body is always `{"detail": "..."}` and never carries the text of
//! an underlying error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::feed::FeedError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or mismatched API key.
    #[error("Invalid API Key")]
    Unauthorized,

    /// Missing or out-of-range filter parameter.
    #[error("invalid {0}")]
    InvalidArgument(&'static str),

    /// Upstream feed failed in any way.
    #[error("usgs upstream error")]
    UpstreamUnavailable,

    /// Local store failed; the cause is logged, not returned.
    #[error("internal server error")]
    StoreFailure,

    #[error("Not Found")]
    NotFound,

    /// Known path, unsupported method.
    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            ApiError::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<FeedError> for ApiError {
    fn from(e: FeedError) -> Self {
        match e {
            FeedError::InvalidArgument { param } => ApiError::InvalidArgument(param),
            FeedError::Unavailable => ApiError::UpstreamUnavailable,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Store read failed");
        ApiError::StoreFailure
    }
}
