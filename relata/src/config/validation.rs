//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &RelataConfig) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_scoring_config(&config.scoring)?;
    validate_cache_config(&config.cache)?;

    Ok(())
}

/// Validate candidate lookup configuration.
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.top_n == 0 {
        return Err(ConfigError::ValidationError(
            "fetcher.top_n must be greater than 0".to_string(),
        ));
    }

    if config.status.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "fetcher.status cannot be empty".to_string(),
        ));
    }

    if config.product_type.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "fetcher.product_type cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate scoring configuration.
fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ConfigError> {
    if !config.base_score.is_finite() {
        return Err(ConfigError::ValidationError(
            "scoring.base_score must be a finite number".to_string(),
        ));
    }

    Ok(())
}

/// Validate cache configuration.
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    // A disabled cache ignores the remaining settings
    if !config.enabled {
        return Ok(());
    }

    if config.capacity == 0 {
        return Err(ConfigError::ValidationError(
            "cache.capacity must be greater than 0 when the cache is enabled".to_string(),
        ));
    }

    Ok(())
}
