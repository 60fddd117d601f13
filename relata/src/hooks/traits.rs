//! Traits for similarity hooks.
//!
//! Hooks let the host adjust candidate lookups and scoring without touching
//! the core: add filters to a query before it runs, veto it, or seed the
//! score of individual candidates.
//!
//! # Examples
//!
//! ```no_run
//! use async_trait::async_trait;
//! use relata::hooks::{HookResult, QueryContext, SimilarityHook};
//! use relata::storage::ItemQuery;
//!
//! #[derive(Debug)]
//! struct SameLanguage(&'static str);
//!
//! #[async_trait]
//! impl SimilarityHook for SameLanguage {
//!     async fn before_query(&self, query: &mut ItemQuery, _ctx: &QueryContext<'_>) -> HookResult {
//!         query.extra_filters.insert("lang".into(), self.0.into());
//!         HookResult::Continue
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::models::{AuthorId, Category, ItemId};
use crate::storage::ItemQuery;

/// Result type for hook execution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HookResult {
    /// Run the query
    #[default]
    Continue,
    /// Skip the query; the lookup yields no candidates
    /// Contains a reason for the veto
    Veto(String),
}

/// What a candidate query is looking for
#[derive(Debug, Clone, Copy)]
pub enum QueryContext<'a> {
    /// Items sharing a category with the source
    Category {
        source_id: ItemId,
        category: &'a Category,
    },
    /// Items by the source's author
    Author {
        source_id: ItemId,
        author: AuthorId,
    },
}

impl QueryContext<'_> {
    pub fn source_id(&self) -> ItemId {
        match self {
            QueryContext::Category { source_id, .. } | QueryContext::Author { source_id, .. } => {
                *source_id
            }
        }
    }
}

/// Trait for similarity hooks
///
/// Every method has a default implementation that changes nothing.
///
/// # Hook Execution
///
/// - Hooks are executed in priority order (higher priority first)
/// - A hook that times out is logged and its modifications are discarded
/// - The first veto stops the chain and the query is not run
#[async_trait]
pub trait SimilarityHook: Send + Sync + std::fmt::Debug {
    /// Called with the fully built query, before the cache lookup
    ///
    /// Modifications take part in the cache key.
    async fn before_query(&self, _query: &mut ItemQuery, _ctx: &QueryContext<'_>) -> HookResult {
        HookResult::Continue
    }

    /// Starting score of `candidate` when it first appears for `source_id`
    ///
    /// `None` defers to lower-priority hooks and finally to the configured
    /// base score.
    fn base_score(&self, _source_id: ItemId, _candidate: ItemId) -> Option<f64> {
        None
    }

    /// Get the priority of this hook (higher = runs first)
    fn priority(&self) -> i32 {
        0
    }

    /// Get the timeout in milliseconds for `before_query`
    fn timeout_ms(&self) -> u64 {
        5000
    }

    /// Get a descriptive name for this hook (for logging and unregistering)
    fn name(&self) -> &str {
        "anonymous_hook"
    }
}
