//! Record reader against an in-memory SQLite store.

use std::time::Duration;

use earthquakes_api::store::{EarthquakeRecord, RecordReader, StoreError};
use sqlx::any::AnyPoolOptions;

const CREATE_TABLE: &str = "\
    CREATE TABLE earthquakes (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        geo_id TEXT NOT NULL UNIQUE, \
        title TEXT NOT NULL, \
        image TEXT, \
        description TEXT)";

/// Single-connection pool so the in-memory database survives between
/// calls, and a leaked connection shows up as an acquire timeout.
async fn memory_reader() -> RecordReader {
    sqlx::any::install_default_drivers();
    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    RecordReader::new(pool)
}

async fn seed(reader: &RecordReader, rows: &[(&str, &str, Option<&str>, Option<&str>)]) {
    sqlx::query(CREATE_TABLE).execute(reader.pool()).await.unwrap();
    for (geo_id, title, image, description) in rows {
        // NULLIF keeps absent columns NULL without binding a typed null.
        sqlx::query(
            "INSERT INTO earthquakes (geo_id, title, image, description) \
             VALUES (?, ?, NULLIF(?, ''), NULLIF(?, ''))",
        )
        .bind(*geo_id)
        .bind(*title)
        .bind(image.unwrap_or_default())
        .bind(description.unwrap_or_default())
        .execute(reader.pool())
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn lists_newest_first() {
    let reader = memory_reader().await;
    seed(
        &reader,
        &[
            ("EQ_SEED_001", "Magnitude 7.0 - Pacific Ocean", Some("https://example.com/eq1.jpg"), Some("Pacific")),
            ("EQ_SEED_002", "Minor Tremor - California", Some("https://example.com/eq2.jpg"), Some("California")),
            ("EQ_SEED_003", "Deep Quake - Japan", Some("https://example.com/eq3.jpg"), Some("Japan")),
        ],
    )
    .await;

    let records = reader.list_records().await.unwrap();

    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(
        records[0],
        EarthquakeRecord {
            id: 3,
            geo_id: "EQ_SEED_003".into(),
            title: "Deep Quake - Japan".into(),
            image: "https://example.com/eq3.jpg".into(),
            description: "Japan".into(),
        }
    );
}

#[tokio::test]
async fn null_columns_become_empty_strings() {
    let reader = memory_reader().await;
    seed(&reader, &[("EQ_X", "Untitled", None, None)]).await;

    let records = reader.list_records().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].image, "");
    assert_eq!(records[0].description, "");
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let reader = memory_reader().await;
    seed(&reader, &[]).await;
    assert!(reader.list_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn failure_releases_connection() {
    let reader = memory_reader().await;

    // No table yet: the read fails inside the transaction.
    let err = reader.list_records().await.unwrap_err();
    assert!(matches!(err, StoreError::Database(_)));

    // With a single-connection pool this only succeeds if the failed
    // transaction gave its connection back.
    seed(&reader, &[("EQ_A", "A", None, None)]).await;
    let records = reader.list_records().await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn serializes_with_snake_case_fields() {
    let record = EarthquakeRecord {
        id: 7,
        geo_id: "EQ_7".into(),
        title: "t".into(),
        image: "i".into(),
        description: "d".into(),
    };
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        serde_json::json!({
            "id": 7, "geo_id": "EQ_7", "title": "t", "image": "i", "description": "d"
        })
    );
}

#[test]
fn malformed_url_fails_at_construction() {
    let config = earthquakes_api::config::DatabaseConfig {
        url: "not a database url".into(),
        ..Default::default()
    };
    assert!(RecordReader::connect_lazy(&config).is_err());
}
