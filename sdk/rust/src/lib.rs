//! Client SDK for the earthquakes API.

pub mod client;
pub mod summary;

pub use client::{EarthquakesClient, SdkError};
pub use summary::{summarize, Coordinates, QuakeSummary};
