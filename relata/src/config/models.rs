//! Configuration model definitions.
//!
//! This module contains the configuration structures for all Relata components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::models::PUBLISHED_STATUS;

/// Main configuration structure for Relata.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RelataConfig {
    /// Candidate lookup configuration
    pub fetcher: FetcherConfig,

    /// Scoring configuration
    pub scoring: ScoringConfig,

    /// Query cache configuration
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Configuration for per-category candidate lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetcherConfig {
    /// Maximum candidates fetched per category (and for the author boost)
    pub top_n: usize,

    /// Status an item must have to be a candidate
    pub status: String,

    /// Content type treated as a sellable product
    pub product_type: String,

    /// Exclude out-of-stock products from candidates
    pub hide_out_of_stock: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            top_n: 15,
            status: PUBLISHED_STATUS.to_string(),
            product_type: "product".to_string(),
            hide_out_of_stock: true,
        }
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score a candidate starts from on first appearance, before taxonomy
    /// points are added. Hooks may override it per candidate.
    pub base_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { base_score: 0.0 }
    }
}

/// Query cache configuration.
///
/// # Example
///
/// ```toml
/// [cache]
/// enabled = true
/// ttl = "2m"
/// capacity = 4096
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether candidate queries are cached at all
    pub enabled: bool,

    /// Lifetime of a cached query result
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,

    /// Maximum number of cached queries (in-process cache only)
    pub capacity: usize,

    /// Prefix prepended to every cache key
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(60),
            capacity: 1024,
            key_prefix: "relata_query_".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
