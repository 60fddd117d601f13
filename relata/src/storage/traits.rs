//! Trait definitions for the collaborators the scorer reads from

use async_trait::async_trait;
use std::fmt::Debug;

use crate::models::{Category, ItemId, ItemSummary};
use crate::storage::errors::StorageResult;
use crate::storage::filters::ItemQuery;

/// Content repository and its query engine
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync + Debug {
    /// Run a candidate query, returning matching ids in query order
    ///
    /// Implementations must honor every field of `query` they understand and
    /// never return more than `query.limit` ids.
    async fn query_items(&self, query: &ItemQuery) -> StorageResult<Vec<ItemId>>;

    /// Get the summary of a single item
    async fn get_item(&self, id: ItemId) -> StorageResult<Option<ItemSummary>>;
}

/// Store of category memberships
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaxonomyStore: Send + Sync + Debug {
    /// Categories attached to `id` within `taxonomy`
    async fn item_categories(&self, id: ItemId, taxonomy: &str) -> StorageResult<Vec<Category>>;
}

/// Visibility metadata for sellable products
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogMetadata: Send + Sync + Debug {
    /// Ids of products hidden from catalog listings
    async fn hidden_from_catalog_ids(&self) -> StorageResult<Vec<ItemId>>;
}
