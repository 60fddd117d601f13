//! # Relata
//!
//! Similar item scoring for content repositories organized by taxonomies
//! (categories, tags, brands...). Given a source item, Relata ranks the items
//! sharing the most weighted categories with it, optionally boosted when
//! they share the source's author. Category lookups are memoized in a TTL
//! query cache.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use relata::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = Arc::new(MemoryContentStore::new());
//!     store.insert(ItemBuilder::new(10).term("category", 1).term("post_tag", 2).build());
//!     store.insert(ItemBuilder::new(20).term("category", 1).term("post_tag", 2).build());
//!     store.insert(ItemBuilder::new(21).term("category", 1).build());
//!
//!     let scorer = SimilarityScorer::in_memory(store, RelataConfig::default())?;
//!     let taxonomies = TaxonomySpec::new().with("category", 1.0).with("post_tag", 2.0);
//!
//!     let similar = scorer
//!         .compute(ItemId::new(10), &[], &taxonomies, &SimilarOptions::new())
//!         .await;
//!     assert_eq!(similar.ids(), vec![ItemId::from(20), ItemId::from(21)]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Similarity**: the scorer and the per-category fetcher
//! - **Storage**: traits for the host's content repository, taxonomy store
//!   and catalog metadata, plus an in-memory implementation
//! - **Cache**: the query cache abstraction and an LRU implementation
//! - **Hooks**: query modification, vetoes and base score injection
//!
//! Collaborator failures never fail a computation; they only remove the
//! candidates of the lookup that failed.

pub mod cache;
pub mod config;
pub mod hooks;
pub mod logging;
pub mod models;
pub mod similarity;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    // Scoring
    pub use crate::similarity::{
        CategoryMatchFetcher, ScoredItem, ScorerBuilder, SimilarItems, SimilarOptions,
        SimilarityRequest, SimilarityScorer, TaxonomySpec, TaxonomyWeight, merge_results,
    };

    // Config types
    pub use crate::config::{ConfigBuilder, ConfigLoader, LogFormat, LogLevel, RelataConfig};

    // Model types
    pub use crate::models::{AuthorId, Category, ContentType, Item, ItemBuilder, ItemId};

    // Collaborators
    pub use crate::cache::{MemoryQueryCache, QueryCache};
    pub use crate::hooks::{HookRegistry, HookResult, QueryContext, SimilarityHook};
    pub use crate::storage::{
        CatalogMetadata, ContentRepository, ItemQuery, MemoryContentStore, StorageError,
        TaxonomyStore,
    };

    pub use crate::{RelataError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Relata operations
#[derive(Debug, thiserror::Error)]
pub enum RelataError {
    /// Error during storage operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error during cache operations
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for RelataError {
    fn from(err: crate::config::ConfigError) -> Self {
        RelataError::Configuration(err.to_string())
    }
}

impl From<crate::cache::CacheError> for RelataError {
    fn from(err: crate::cache::CacheError) -> Self {
        RelataError::Cache(err.to_string())
    }
}

/// Result type for Relata operations
pub type Result<T> = std::result::Result<T, RelataError>;

/// Initialize logging and build an in-memory scorer from `config`
///
/// Returns the scorer together with the guard of the non-blocking log file
/// writer, if one was set up; keep the guard alive for as long as logs
/// should be flushed.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use relata::prelude::*;
///
/// async fn example() -> Result<()> {
///     let config = ConfigBuilder::development().build()?;
///     let store = Arc::new(MemoryContentStore::new());
///     let (scorer, _guard) = relata::init(config, store)?;
///     assert!(scorer.config().cache.enabled);
///     Ok(())
/// }
/// ```
pub fn init(
    config: config::RelataConfig,
    store: std::sync::Arc<storage::MemoryContentStore>,
) -> Result<(
    similarity::SimilarityScorer,
    Option<tracing_appender::non_blocking::WorkerGuard>,
)> {
    let guard = logging::init(&config.logging)?;
    let scorer = similarity::SimilarityScorer::in_memory(store, config)?;
    Ok((scorer, guard))
}
