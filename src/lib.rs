//! Earthquakes API library.
//!
//! A small gateway serving earthquake data: a pass-through proxy to the
//! public USGS feed behind a shared-secret header, plus a read path over
//! locally curated records.

pub mod config;
pub mod feed;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::schema::ApiConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
