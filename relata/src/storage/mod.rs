//! Storage abstractions and implementations
//!
//! This module provides the trait definitions through which the scorer reads
//! the host's content, along with an in-memory implementation.
//!
//! ## Collaborators
//!
//! - **ContentRepository**: runs candidate queries ([`ItemQuery`]) and
//!   resolves item summaries
//! - **TaxonomyStore**: lists the categories attached to an item
//! - **CatalogMetadata**: reports products hidden from the catalog
//! - **MemoryContentStore**: in-memory implementation of all three

pub mod errors;
pub mod filters;
pub mod memory;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use filters::{CategoryFilter, FilterOperator, ItemQuery, OrderBy, QueryOrder, SortDirection};
pub use memory::MemoryContentStore;
pub use traits::{CatalogMetadata, ContentRepository, TaxonomyStore};
