//! Flattening of GeoJSON feed features into list-friendly summaries.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
    pub depth_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeSummary {
    pub id: String,
    pub title: String,
    pub magnitude: Option<f64>,
    pub place: Option<String>,
    /// Epoch milliseconds.
    pub time: Option<i64>,
    pub updated: Option<i64>,
    pub coordinates: Option<Coordinates>,
    pub usgs_url: Option<String>,
    pub detail_url: Option<String>,
}

/// Summaries for every feature in a feature collection. Anything that is
/// not a feature collection yields an empty list.
pub fn summarize(document: &Value) -> Vec<QuakeSummary> {
    document
        .get("features")
        .and_then(Value::as_array)
        .map(|features| features.iter().map(summarize_feature).collect())
        .unwrap_or_default()
}

fn summarize_feature(feature: &Value) -> QuakeSummary {
    let props = feature.get("properties").unwrap_or(&Value::Null);
    let text = |key: &str| props.get(key).and_then(Value::as_str).map(str::to_string);

    let magnitude = props.get("mag").and_then(Value::as_f64);
    let place = text("place");

    let title = text("title").unwrap_or_else(|| {
        format!(
            "M {} - {}",
            magnitude.map_or_else(|| "?".to_string(), |m| m.to_string()),
            place.as_deref().unwrap_or("Unknown location")
        )
    });

    let id = match feature.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    QuakeSummary {
        id,
        title,
        magnitude,
        place,
        time: props.get("time").and_then(Value::as_i64),
        updated: props.get("updated").and_then(Value::as_i64),
        coordinates: point_coordinates(feature.get("geometry")),
        usgs_url: text("url"),
        detail_url: text("detail"),
    }
}

fn point_coordinates(geometry: Option<&Value>) -> Option<Coordinates> {
    let geometry = geometry?;
    if geometry.get("type").and_then(Value::as_str) != Some("Point") {
        return None;
    }
    let coords = geometry.get("coordinates")?.as_array()?;
    Some(Coordinates {
        lon: coords.first()?.as_f64()?,
        lat: coords.get(1)?.as_f64()?,
        depth_km: coords.get(2).and_then(Value::as_f64),
    })
}
