//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, then env overrides)
//!     → validation.rs (semantic checks)
//!     → ApiConfig (validated, immutable)
//!     → moved into HttpServer::new, each component keeps the section it needs
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at process start and never mutated
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ApiConfig, AuthConfig, DatabaseConfig, ListenerConfig, ObservabilityConfig, ServerConfig,
    TimeoutConfig, UpstreamConfig,
};
