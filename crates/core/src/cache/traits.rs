use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for a tag-aware key/value cache store.
///
/// Implementations must make `set` and `invalidate_tag` individually atomic
/// with respect to readers: after `invalidate_tag` returns, `get` on any key
/// stored with that tag returns `None`.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value with an optional TTL and records it under each tag.
    async fn set(&self, key: &str, value: &[u8], tags: &[String], ttl: Option<Duration>)
        -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes every value stored under `tag`.
    async fn invalidate_tag(&self, tag: &str) -> Result<()>;
}
