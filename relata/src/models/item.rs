//! Item model representing a piece of content in the host repository

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status used by most hosts for publicly visible items
pub const PUBLISHED_STATUS: &str = "publish";

/// Numeric identifier of a content item
///
/// Identifiers are positive; `0` is never a valid item and is treated as
/// "no item" by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Create an identifier, rejecting zero
    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// Raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }

    /// Whether this identifier can refer to a stored item
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }

    /// Parse an identifier from loosely typed host input.
    ///
    /// Accepts positive integers, integral floats and numeric strings.
    /// Anything else (null, negative, zero, fractional, non-numeric) yields `None`.
    pub fn parse(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(id) = n.as_u64() {
                    Self::new(id)
                } else {
                    n.as_f64()
                        .filter(|f| f.is_finite() && f.fract() == 0.0 && *f > 0.0)
                        .and_then(|f| Self::new(f as u64))
                }
            }
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u64 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid item id: {}", s))?;
        Self::new(id).ok_or_else(|| format!("Invalid item id: {}", s))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier of an author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub u64);

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content type of an item (e.g. `post`, `page`, `product`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(String);

impl ContentType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentType {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ContentType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A category (term) attached to an item.
///
/// `term_taxonomy_id` is unique across all taxonomies and is what queries are
/// keyed on. `display_id` is the term's public identifier and may be shared by
/// terms of different taxonomies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Taxonomy the category belongs to
    pub taxonomy: String,
    /// Taxonomy-scoped identifier
    pub term_taxonomy_id: u64,
    /// Display identifier
    pub display_id: u64,
}

impl Category {
    pub fn new(taxonomy: impl Into<String>, term_taxonomy_id: u64, display_id: u64) -> Self {
        Self {
            taxonomy: taxonomy.into(),
            term_taxonomy_id,
            display_id,
        }
    }
}

/// Minimal view of an item, as needed by the scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: ItemId,
    pub content_type: ContentType,
    pub author: AuthorId,
    pub status: String,
}

/// A full content item, as held by in-process repositories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,

    /// Content type
    pub content_type: ContentType,

    /// Author of the item
    pub author: AuthorId,

    /// Publication status
    pub status: String,

    /// Creation timestamp, used for recency ordering
    pub created_at: DateTime<Utc>,

    /// Categories across all taxonomies
    pub categories: Vec<Category>,

    /// Hidden from catalog listings (sellable products)
    pub hidden_from_catalog: bool,

    /// Out of stock (sellable products)
    pub out_of_stock: bool,
}

impl Item {
    /// Categories of this item within one taxonomy, in attachment order
    pub fn categories_in<'a>(&'a self, taxonomy: &'a str) -> impl Iterator<Item = &'a Category> {
        self.categories
            .iter()
            .filter(move |category| category.taxonomy == taxonomy)
    }

    /// Whether the item carries the given taxonomy-scoped category id
    pub fn has_term(&self, taxonomy: &str, term_taxonomy_id: u64) -> bool {
        self.categories_in(taxonomy)
            .any(|category| category.term_taxonomy_id == term_taxonomy_id)
    }

    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            id: self.id,
            content_type: self.content_type.clone(),
            author: self.author,
            status: self.status.clone(),
        }
    }
}

/// Builder for creating items
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    /// Create a published `post` by author 1, created now
    pub fn new(id: u64) -> Self {
        Self {
            item: Item {
                id: ItemId::from(id),
                content_type: ContentType::from("post"),
                author: AuthorId(1),
                status: PUBLISHED_STATUS.to_string(),
                created_at: Utc::now(),
                categories: Vec::new(),
                hidden_from_catalog: false,
                out_of_stock: false,
            },
        }
    }

    pub fn content_type(mut self, content_type: impl Into<ContentType>) -> Self {
        self.item.content_type = content_type.into();
        self
    }

    pub fn author(mut self, author: u64) -> Self {
        self.item.author = AuthorId(author);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.item.status = status.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.item.created_at = created_at;
        self
    }

    /// Attach a category
    pub fn category(mut self, category: Category) -> Self {
        self.item.categories.push(category);
        self
    }

    /// Attach a category whose display id equals its taxonomy-scoped id
    pub fn term(self, taxonomy: &str, term_taxonomy_id: u64) -> Self {
        self.category(Category::new(taxonomy, term_taxonomy_id, term_taxonomy_id))
    }

    pub fn hidden_from_catalog(mut self, hidden: bool) -> Self {
        self.item.hidden_from_catalog = hidden;
        self
    }

    pub fn out_of_stock(mut self, out_of_stock: bool) -> Self {
        self.item.out_of_stock = out_of_stock;
        self
    }

    pub fn build(self) -> Item {
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_id_parse_accepts_positive_numbers() {
        assert_eq!(ItemId::parse(&json!(10)), Some(ItemId::from(10)));
        assert_eq!(ItemId::parse(&json!("42")), Some(ItemId::from(42)));
        assert_eq!(ItemId::parse(&json!(" 7 ")), Some(ItemId::from(7)));
        assert_eq!(ItemId::parse(&json!(12.0)), Some(ItemId::from(12)));
    }

    #[test]
    fn test_item_id_parse_rejects_invalid_input() {
        for value in [
            json!(null),
            json!(0),
            json!(-3),
            json!(1.5),
            json!("abc"),
            json!("-1"),
            json!(""),
            json!([1]),
            json!({"id": 1}),
            json!(true),
        ] {
            assert_eq!(ItemId::parse(&value), None, "accepted {}", value);
        }
    }

    #[test]
    fn test_item_categories_in_taxonomy() {
        let item = ItemBuilder::new(1)
            .term("category", 3)
            .term("post_tag", 4)
            .category(Category::new("category", 5, 99))
            .build();

        let ids: Vec<u64> = item
            .categories_in("category")
            .map(|c| c.term_taxonomy_id)
            .collect();
        assert_eq!(ids, vec![3, 5]);
        assert!(item.has_term("category", 5));
        assert!(!item.has_term("category", 99));
        assert!(!item.has_term("post_tag", 3));
    }
}
