//! Route handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::feed::FilterSelection;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Legacy listing route, now served from the live feed with fixed filters.
pub async fn get_earthquakes(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let document = state.feed.fetch(FilterSelection::DEFAULT).await?;
    Ok(Json(document))
}

/// Filter parameters of the public route.
///
/// Built from the raw pairs so a repeated key keeps its last value instead
/// of failing deserialization.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PublicFeedQuery {
    pub timebox: Option<String>,
    pub magnitude: Option<String>,
}

impl PublicFeedQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "timebox" => query.timebox = Some(value),
                "magnitude" => query.magnitude = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Live feed filtered by caller-supplied window and threshold.
pub async fn public_earthquakes(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let query = match pairs {
        Ok(Query(pairs)) => PublicFeedQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable query string");
            PublicFeedQuery::default()
        }
    };

    let timebox = query.timebox.ok_or(ApiError::InvalidArgument("timebox"))?;
    let magnitude = query
        .magnitude
        .ok_or(ApiError::InvalidArgument("magnitude"))?;

    let document = state.feed.resolve(&timebox, &magnitude).await?;
    Ok(Json(document))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
