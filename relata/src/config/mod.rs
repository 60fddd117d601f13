//! Configuration system for Relata.
//!
//! Tunables (top-N, cache TTL, out-of-stock exclusion, status filter, base
//! score) are loaded once, validated, and handed to the scorer at
//! construction. Sources are layered: defaults, configuration files, then
//! environment variables.

mod builder;
mod loader;
mod models;
#[cfg(test)]
mod tests;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "relata.toml",
    "relata.yaml",
    "relata.yml",
    "relata.json",
    ".relata/config.toml",
    ".relata/config.yaml",
    ".relata/config.yml",
    ".relata/config.json",
];

/// Environment variable prefix for Relata configuration
pub const ENV_PREFIX: &str = "RELATA_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
