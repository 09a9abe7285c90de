//! Redis cache implementation.
//!
//! Redis has no native tags, so every tagged key is also added to a tracking
//! set (`tag:{tag}:_keys`). Invalidating a tag reads the set, deletes the
//! member keys and then the set itself, without any SCAN.
//!
//! # Non-Atomicity Safety
//!
//! `set` and `invalidate_tag` each issue several commands. This is safe:
//!
//! - **Orphaned members**: if a key expires or the SET fails after SADD, the
//!   tracking set references a missing key. DEL on a missing key is a no-op.
//!   A tracking set written with a TTL expires along with its newest member.
//!
//! - **Concurrent write during invalidation**: a page computed before the
//!   write but stored after the purge can survive until its TTL. Invalidation
//!   runs after the repository write, so a new read recomputes from the store.
//!
//! The worst case is a stale page bounded by the TTL, not data corruption.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use gamecatalog_core::cache::{tag_tracking_key, Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://127.0.0.1:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(
        &self,
        key: &str,
        value: &[u8],
        tags: &[String],
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut conn = self.conn.clone();
        let seconds = ttl.map(|duration| duration.as_secs().max(1));

        match seconds {
            Some(seconds) => {
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        for tag in tags {
            let tracking_key = tag_tracking_key(tag);
            conn.sadd::<_, _, ()>(&tracking_key, key)
                .await
                .map_err(map_redis_error)?;
            // Members already in the set expire no later than this one.
            if let Some(seconds) = seconds {
                let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
                conn.expire::<_, ()>(&tracking_key, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn invalidate_tag(&self, tag: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let tracking_key = tag_tracking_key(tag);

        let tracked_keys: Vec<String> = conn
            .smembers(&tracking_key)
            .await
            .map_err(map_redis_error)?;

        if !tracked_keys.is_empty() {
            conn.del::<_, ()>(&tracked_keys)
                .await
                .map_err(map_redis_error)?;
        }

        conn.del::<_, ()>(&tracking_key)
            .await
            .map_err(map_redis_error)?;

        tracing::trace!(tag, count = tracked_keys.len(), "Invalidated cache tag");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        let cache = RedisCache::new(&redis_url()).await.ok()?;
        // The connection manager connects lazily on some setups.
        cache.get("test:ping").await.ok()?;
        Some(cache)
    }

    /// Generate a unique test key to avoid conflicts.
    fn test_key(suffix: &str) -> String {
        format!("test:redis_cache:{}:{}", Uuid::new_v4(), suffix)
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("set_get");
        let value = b"hello world";

        cache.set(&key, value, &[], None).await.unwrap();

        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, Some(value.to_vec()));

        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_delete() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("delete");
        cache.set(&key, b"to be deleted", &[], None).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        cache.delete(&key).await.unwrap();

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("ttl");
        cache
            .set(&key, b"expiring value", &[], Some(Duration::from_secs(1)))
            .await
            .unwrap();

        assert!(cache.get(&key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_invalidate_tag() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let tag = format!("test{}Cache", Uuid::new_v4().simple());
        let other_tag = format!("test{}Cache", Uuid::new_v4().simple());
        let key1 = test_key("page1");
        let key2 = test_key("page2");
        let key3 = test_key("other");

        cache
            .set(&key1, b"1", &[tag.clone()], None)
            .await
            .unwrap();
        cache
            .set(&key2, b"2", &[tag.clone()], None)
            .await
            .unwrap();
        cache
            .set(&key3, b"3", &[other_tag.clone()], None)
            .await
            .unwrap();

        let mut conn = cache.conn.clone();
        let tracked: Vec<String> = conn.smembers(tag_tracking_key(&tag)).await.unwrap();
        assert_eq!(tracked.len(), 2);

        cache.invalidate_tag(&tag).await.unwrap();

        assert!(cache.get(&key1).await.unwrap().is_none());
        assert!(cache.get(&key2).await.unwrap().is_none());
        assert!(cache.get(&key3).await.unwrap().is_some());

        let tracked_after: Vec<String> = conn.smembers(tag_tracking_key(&tag)).await.unwrap();
        assert!(tracked_after.is_empty());

        cache.invalidate_tag(&other_tag).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_tracking_set_expires_with_entries() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("tracked");
        let tag = format!("tag-{}", Uuid::new_v4());
        cache
            .set(&key, b"[]", &[tag.clone()], Some(Duration::from_secs(60)))
            .await
            .unwrap();

        let mut conn = cache.conn.clone();
        let ttl: i64 = conn.ttl(tag_tracking_key(&tag)).await.unwrap();
        assert!(ttl > 0 && ttl <= 60, "unexpected ttl {ttl}");

        cache.invalidate_tag(&tag).await.unwrap();
    }
}
