//! Query parameters for candidate item lookups

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AuthorId, ContentType, ItemId};

/// Field used to order query results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    /// Creation date
    #[default]
    Date,
    /// Item identifier
    Id,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Result ordering of a query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct QueryOrder {
    pub by: OrderBy,
    pub direction: SortDirection,
}

impl QueryOrder {
    /// Most recently created first
    pub fn newest_first() -> Self {
        Self {
            by: OrderBy::Date,
            direction: SortDirection::Desc,
        }
    }
}

/// Whether a category filter keeps or drops matching items
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    #[default]
    In,
    NotIn,
}

/// Category membership filter, keyed on the taxonomy-scoped identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryFilter {
    pub taxonomy: String,
    pub term_taxonomy_id: u64,
    pub operator: FilterOperator,
}

/// Fully resolved parameters of a candidate lookup.
///
/// The serialized form of this struct is the identity of a query: two queries
/// with equal serializations hit the same cache entry. Collections are kept
/// in a canonical order by the builder methods so that equivalent queries
/// serialize identically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ItemQuery {
    /// Allowed content types (sorted, deduplicated)
    pub content_types: Vec<ContentType>,

    /// Required status
    pub status: String,

    /// Items never returned (sorted, deduplicated)
    pub exclude_ids: Vec<ItemId>,

    /// Result ordering
    pub order: QueryOrder,

    /// Maximum number of results
    pub limit: usize,

    /// Category membership filter
    pub category: Option<CategoryFilter>,

    /// Author filter
    pub author: Option<AuthorId>,

    /// Drop items flagged out of stock
    pub exclude_out_of_stock: bool,

    /// Host-defined filters, opaque to the core
    pub extra_filters: BTreeMap<String, serde_json::Value>,
}

impl ItemQuery {
    /// Create a query for published items of the given types, newest first
    pub fn new(content_types: &[ContentType], status: impl Into<String>, limit: usize) -> Self {
        let mut content_types = content_types.to_vec();
        content_types.sort();
        content_types.dedup();

        Self {
            content_types,
            status: status.into(),
            exclude_ids: Vec::new(),
            order: QueryOrder::newest_first(),
            limit,
            category: None,
            author: None,
            exclude_out_of_stock: false,
            extra_filters: BTreeMap::new(),
        }
    }

    /// Exclude additional item ids
    pub fn exclude(mut self, ids: impl IntoIterator<Item = ItemId>) -> Self {
        self.exclude_ids.extend(ids);
        self.exclude_ids.sort();
        self.exclude_ids.dedup();
        self
    }

    /// Restrict to items carrying the given category
    pub fn in_category(mut self, taxonomy: impl Into<String>, term_taxonomy_id: u64) -> Self {
        self.category = Some(CategoryFilter {
            taxonomy: taxonomy.into(),
            term_taxonomy_id,
            operator: FilterOperator::In,
        });
        self
    }

    /// Restrict to items written by the given author
    pub fn by_author(mut self, author: AuthorId) -> Self {
        self.author = Some(author);
        self
    }

    pub fn without_out_of_stock(mut self, exclude: bool) -> Self {
        self.exclude_out_of_stock = exclude;
        self
    }

    /// Attach a host-defined filter
    pub fn with_extra_filter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra_filters.insert(key.into(), value);
        self
    }

    /// Whether `id` is excluded by this query
    pub fn excludes(&self, id: ItemId) -> bool {
        self.exclude_ids.binary_search(&id).is_ok()
    }
}
