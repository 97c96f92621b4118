//! Request middleware.

pub mod api_key;

pub use api_key::{require_api_key, ApiKeyGate};
