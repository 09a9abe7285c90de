//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using
//! tokio synchronization primitives and LRU eviction policy.
//!
//! This implementation mirrors the Redis cache behavior for consistency:
//! every key written with tags is recorded in a per-tag key set, and
//! invalidating a tag pops every recorded key.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use gamecatalog_core::cache::{Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// Store and tag index share one lock so a reader never sees a key that an
/// in-flight invalidation has already unlinked from its tag.
#[derive(Debug)]
struct Inner {
    store: LruCache<String, CacheEntry>,
    /// Maps tag -> set of cache keys stored under it.
    tags: HashMap<String, HashSet<String>>,
}

impl Inner {
    /// Removes `key` from every tag set, dropping sets left empty.
    fn unlink(&mut self, key: &str) {
        self.tags.retain(|_, keys| {
            keys.remove(key);
            !keys.is_empty()
        });
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<..>>` for concurrent access.
/// Supports TTL with lazy expiration (entries are cleaned up on access).
/// Uses LRU eviction to limit memory usage when max_entries is reached.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in.
    ///   A value of 0 is treated as 1.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(RwLock::new(Inner {
                store: LruCache::new(capacity),
                tags: HashMap::new(),
            })),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // LRU bookkeeping needs a write lock even on reads.
        let mut inner = self.inner.write().await;

        let Some(entry) = inner.store.get(key) else {
            return Ok(None);
        };
        if !entry.is_expired() {
            return Ok(Some(entry.value.clone()));
        }
        inner.store.pop(key);
        inner.unlink(key);
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: &[u8],
        tags: &[String],
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut inner = self.inner.write().await;
        // `push` hands back the evicted entry, or the old one for this key.
        if let Some((evicted, _)) = inner
            .store
            .push(key.to_string(), CacheEntry::new(value.to_vec(), ttl))
        {
            inner.unlink(&evicted);
        }

        for tag in tags {
            inner
                .tags
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.store.pop(key);
        inner.unlink(key);
        Ok(())
    }

    async fn invalidate_tag(&self, tag: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        let Some(keys) = inner.tags.remove(tag) else {
            return Ok(());
        };
        for key in &keys {
            inner.store.pop(key);
        }
        tracing::trace!(tag, count = keys.len(), "Invalidated cache tag");
        Ok(())
    }
}
