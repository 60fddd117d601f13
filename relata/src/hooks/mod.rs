//! Similarity hooks system
//!
//! Hooks are the extension points of the scorer. They allow hosts to:
//! - Add filters to, or veto, a candidate query before it runs
//! - Seed the starting score of candidates
//!
//! Hooks are registered on a [`HookRegistry`] handed to the scorer at
//! construction; there is no global registry.
//!
//! # Architecture
//!
//! - `traits.rs`: Core `SimilarityHook` trait, `HookResult` and `QueryContext`
//! - `registry.rs`: `HookRegistry` for managing hook registration and execution

pub mod registry;
pub mod traits;

pub use registry::HookRegistry;
pub use traits::{HookResult, QueryContext, SimilarityHook};
