//! Domain models for content items and their categories

pub mod item;

pub use item::{
    AuthorId, Category, ContentType, Item, ItemBuilder, ItemId, ItemSummary, PUBLISHED_STATUS,
};
