//! Query result caching
//!
//! Candidate lookups are memoized under a hash of their fully resolved
//! parameters. The cache is an interchangeable dependency: hosts can plug an
//! external store behind [`QueryCache`], while [`MemoryQueryCache`] provides
//! an in-process LRU with per-entry expiry.

pub mod key;
pub mod memory;
pub mod traits;

pub use key::query_cache_key;
pub use memory::{CacheStats, MemoryQueryCache};
pub use traits::QueryCache;

/// Error type for cache operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The cache backend cannot be reached
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// A key or value could not be encoded
    #[error("Cache serialization error: {0}")]
    Serialization(String),

    /// Backend-specific failure
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Result type for cache operations
pub type CacheResult<T> = std::result::Result<T, CacheError>;

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}
