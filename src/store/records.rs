//! Read path over the persisted earthquake records.

use serde::Serialize;
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::config::DatabaseConfig;
use crate::store::StoreError;

/// A curated earthquake record, seeded out-of-band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct EarthquakeRecord {
    pub id: i64,
    pub geo_id: String,
    pub title: String,
    pub image: String,
    pub description: String,
}

// Nullable columns are shaped to empty strings; the id cast keeps the Any
// driver decoding a 64-bit integer on both Postgres (int4) and SQLite.
const LIST_RECORDS: &str = "\
    SELECT CAST(id AS BIGINT) AS id, geo_id, title, \
           COALESCE(image, '') AS image, COALESCE(description, '') AS description \
    FROM earthquakes \
    ORDER BY id DESC";

/// Reads records from the local store.
#[derive(Clone)]
pub struct RecordReader {
    pool: AnyPool,
}

impl RecordReader {
    /// Wrap an existing pool.
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// Build a lazily connecting pool from config.
    ///
    /// A malformed URL fails here; no connection is opened until first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, StoreError> {
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy(&config.url)?;
        Ok(Self::new(pool))
    }

    /// Apply the embedded schema and seed migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Every record, most recently created first.
    ///
    /// Runs inside one transaction. On any error the transaction guard is
    /// dropped, which rolls it back and returns the connection to the pool.
    pub async fn list_records(&self) -> Result<Vec<EarthquakeRecord>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let records = sqlx::query_as::<_, EarthquakeRecord>(LIST_RECORDS)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(count = records.len(), "Listed earthquake records");
        Ok(records)
    }

    /// Underlying pool, for shutdown and tests.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}
