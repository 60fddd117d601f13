//! In-memory content store
//!
//! Implements every collaborator trait over a plain list of [`Item`]s. Useful
//! for tests, demos, and hosts that already hold their catalog in memory.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::RwLock;

use crate::models::{Category, Item, ItemId, ItemSummary};
use crate::storage::errors::{StorageError, StorageResult};
use crate::storage::filters::{FilterOperator, ItemQuery, OrderBy, SortDirection};
use crate::storage::traits::{CatalogMetadata, ContentRepository, TaxonomyStore};

/// Content store backed by an in-memory item list
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    items: RwLock<Vec<Item>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with items
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let store = Self::new();
        for item in items {
            store.insert(item);
        }
        store
    }

    /// Insert or replace an item
    pub fn insert(&self, item: Item) {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }

    /// Remove an item, returning whether it existed
    pub fn remove(&self, id: ItemId) -> bool {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() != before
    }

    pub fn len(&self) -> usize {
        self.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StorageResult<std::sync::RwLockReadGuard<'_, Vec<Item>>> {
        self.items
            .read()
            .map_err(|e| StorageError::Backend(format!("item store lock poisoned: {}", e)))
    }

    fn matches(item: &Item, query: &ItemQuery) -> bool {
        if !query.content_types.contains(&item.content_type) {
            return false;
        }
        if item.status != query.status || query.excludes(item.id) {
            return false;
        }
        if query.exclude_out_of_stock && item.out_of_stock {
            return false;
        }
        if let Some(author) = query.author
            && item.author != author
        {
            return false;
        }
        if let Some(filter) = &query.category {
            let has_term = item.has_term(&filter.taxonomy, filter.term_taxonomy_id);
            match filter.operator {
                FilterOperator::In if !has_term => return false,
                FilterOperator::NotIn if has_term => return false,
                _ => {}
            }
        }
        true
    }

    fn compare(a: &Item, b: &Item, query: &ItemQuery) -> Ordering {
        let ordering = match query.order.by {
            OrderBy::Date => a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)),
            OrderBy::Id => a.id.cmp(&b.id),
        };
        match query.order.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[async_trait]
impl ContentRepository for MemoryContentStore {
    async fn query_items(&self, query: &ItemQuery) -> StorageResult<Vec<ItemId>> {
        let items = self.read()?;
        let mut matching: Vec<&Item> = items
            .iter()
            .filter(|item| Self::matches(item, query))
            .collect();
        matching.sort_by(|a, b| Self::compare(a, b, query));

        Ok(matching
            .into_iter()
            .take(query.limit)
            .map(|item| item.id)
            .collect())
    }

    async fn get_item(&self, id: ItemId) -> StorageResult<Option<ItemSummary>> {
        let items = self.read()?;
        Ok(items.iter().find(|item| item.id == id).map(Item::summary))
    }
}

#[async_trait]
impl TaxonomyStore for MemoryContentStore {
    async fn item_categories(&self, id: ItemId, taxonomy: &str) -> StorageResult<Vec<Category>> {
        let items = self.read()?;
        let item = items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("item {}", id)))?;
        Ok(item.categories_in(taxonomy).cloned().collect())
    }
}

#[async_trait]
impl CatalogMetadata for MemoryContentStore {
    async fn hidden_from_catalog_ids(&self) -> StorageResult<Vec<ItemId>> {
        let items = self.read()?;
        Ok(items
            .iter()
            .filter(|item| item.hidden_from_catalog)
            .map(|item| item.id)
            .collect())
    }
}
