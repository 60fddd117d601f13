//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::Path;
use std::time::Duration;

/// Builder for creating RelataConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: RelataConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: RelataConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: RelataConfig) -> Self {
        Self { config }
    }

    /// Set the number of candidates fetched per category.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.config.fetcher.top_n = top_n;
        self
    }

    /// Set the status candidates must have.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.config.fetcher.status = status.into();
        self
    }

    /// Set the content type treated as a sellable product.
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.config.fetcher.product_type = product_type.into();
        self
    }

    /// Include or exclude out-of-stock products.
    pub fn with_hide_out_of_stock(mut self, hide: bool) -> Self {
        self.config.fetcher.hide_out_of_stock = hide;
        self
    }

    /// Set the starting score of every candidate.
    pub fn with_base_score(mut self, base_score: f64) -> Self {
        self.config.scoring.base_score = base_score;
        self
    }

    /// Set the lifetime of cached query results.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache.ttl = ttl;
        self
    }

    /// Set the maximum number of cached queries.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache.capacity = capacity;
        self
    }

    /// Set the prefix of cache keys.
    pub fn with_cache_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.cache.key_prefix = prefix.into();
        self
    }

    /// Disable query caching entirely.
    pub fn without_cache(mut self) -> Self {
        self.config.cache.enabled = false;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use default logging configuration (console output at Info level)
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging.level = LogLevel::Info;
        self.config.logging.format = LogFormat::Json;
        self.config.logging.file = None;
        self
    }

    /// Create a configuration for development.
    ///
    /// Short cache lifetime so that content edits show up quickly, and
    /// debug-level logging.
    pub fn development() -> Self {
        Self::new()
            .with_cache_ttl(Duration::from_secs(5))
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
    }

    /// Create a configuration for testing.
    ///
    /// Caching disabled so every call reaches the repository.
    pub fn testing() -> Self {
        Self::development().without_cache()
    }

    /// Create a production-ready configuration.
    ///
    /// Default lookup bounds, a five minute cache and JSON logs at Info level.
    pub fn production() -> Self {
        Self::new()
            .with_cache_ttl(Duration::from_secs(300))
            .with_default_logging()
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<RelataConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
