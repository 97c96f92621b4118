//! Upstream feed proxy.
//!
//! # Data Flow
//! ```text
//! raw codes (timebox, magnitude)
//!     → filter.rs (closed lookup, reject unknown codes)
//!     → client.rs (build URL, single bounded GET, parse JSON)
//!     → document returned verbatim, or one opaque error
//! ```

pub mod client;
pub mod filter;

pub use client::FeedClient;
pub use filter::{FilterSelection, Magnitude, Timebox};

/// Errors surfaced by the feed proxy.
///
/// Transport, status, timeout and decode failures all collapse into
/// `Unavailable`; the detail stays in the server log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// A filter code outside its enumeration.
    #[error("invalid {param}")]
    InvalidArgument { param: &'static str },

    /// The upstream could not produce a usable document.
    #[error("usgs upstream error")]
    Unavailable,
}
