//! Cache store abstraction

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use super::CacheResult;
use crate::models::ItemId;

/// Key/value store holding candidate id lists with a time-to-live.
///
/// Entries are immutable once written; callers never invalidate them
/// explicitly and rely on expiry instead. Concurrent writers of the same key
/// always write the same value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryCache: Send + Sync + Debug {
    /// Look up a cached id list, `None` on miss or expiry
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<ItemId>>>;

    /// Store an id list for `ttl`
    async fn set(&self, key: &str, ids: &[ItemId], ttl: Duration) -> CacheResult<()>;
}
