//! Similar item scoring
//!
//! Two layers:
//!
//! - [`CategoryMatchFetcher`] resolves one shared category (or the source's
//!   author) into a bounded, newest-first list of candidates, through the
//!   hook registry and the query cache.
//! - [`SimilarityScorer`] walks the requested taxonomies, accumulates the
//!   weighted points of every candidate, applies the optional same-author
//!   boost and projects the ranking according to [`SimilarOptions`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use relata::prelude::*;
//!
//! # async fn example(store: Arc<MemoryContentStore>) -> Result<()> {
//! let scorer = SimilarityScorer::in_memory(store, RelataConfig::default())?;
//! let taxonomies = TaxonomySpec::new().with("category", 1.0).with("post_tag", 3.0);
//! let similar = scorer
//!     .compute(ItemId::new(10), &[], &taxonomies, &SimilarOptions::new())
//!     .await;
//! println!("{}", serde_json::to_string(&similar).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod fetcher;
pub mod merge;
pub mod options;
pub mod request;
pub mod scorer;
pub mod table;
pub mod taxonomy;

pub use fetcher::{CategoryMatchFetcher, LookupScope};
pub use merge::merge_results;
pub use options::SimilarOptions;
pub use request::SimilarityRequest;
pub use scorer::{ScorerBuilder, SimilarityScorer};
pub use table::{ScoreTable, ScoredItem, SimilarItems};
pub use taxonomy::{TaxonomySpec, TaxonomyWeight};
