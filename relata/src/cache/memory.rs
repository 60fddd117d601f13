//! In-process query cache.
//!
//! LRU-bounded map with a per-entry expiry deadline. Deadlines are measured on
//! the tokio clock so that paused-time tests can advance past them.

use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::{CacheResult, QueryCache};
use crate::config::CacheConfig;
use crate::models::ItemId;

/// Cached candidate list with its expiry deadline
#[derive(Debug)]
struct CachedQuery {
    ids: Vec<ItemId>,
    expires_at: Instant,
}

/// LRU query cache with TTL expiry
#[derive(Debug)]
pub struct MemoryQueryCache {
    entries: Mutex<LruCache<String, CachedQuery>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryQueryCache {
    /// Create a cache holding at most `capacity` queries
    pub fn new(capacity: usize) -> Self {
        let bound = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(bound)),
            capacity: bound.get(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().await;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: entries.len(),
            capacity: self.capacity,
        }
    }
}

impl Default for MemoryQueryCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

#[async_trait]
impl QueryCache for MemoryQueryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<ItemId>>> {
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get(key) {
            if entry.expires_at > Instant::now() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(entry.ids.clone()));
            }
            entries.pop(key);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn set(&self, key: &str, ids: &[ItemId], ttl: Duration) -> CacheResult<()> {
        if ttl.is_zero() {
            return Ok(());
        }

        let mut entries = self.entries.lock().await;
        entries.put(
            key.to_string(),
            CachedQuery {
                ids: ids.to_vec(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

/// Cache statistics for monitoring and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries currently held
    pub size: usize,
    /// Maximum entries held
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
