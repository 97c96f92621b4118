//! Local record store.
//!
//! Records are created by migrations/seeding outside the request path; the
//! API only reads them.

pub mod records;

pub use records::{EarthquakeRecord, RecordReader};

/// Failure while talking to the store. The inner error is for logs only.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
