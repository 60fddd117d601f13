//! Deterministic cache keys for candidate queries

use sha2::{Digest, Sha256};

use super::CacheResult;
use crate::storage::ItemQuery;

/// Hash the fully resolved query into a cache key.
///
/// The key is `prefix` followed by the hex SHA-256 of the query's JSON
/// encoding, so every parameter (including host-defined filters) takes part.
pub fn query_cache_key(prefix: &str, query: &ItemQuery) -> CacheResult<String> {
    let encoded = serde_json::to_vec(query)?;
    let digest = Sha256::digest(&encoded);
    Ok(format!("{}{:x}", prefix, digest))
}
