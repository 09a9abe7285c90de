//! Paginated list caching with tag-based invalidation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use gamecatalog_core::cache::{
    cache_tag, deserialize_page, list_key, serialize_page, Cache, Resource,
};
use gamecatalog_core::pagination::Pagination;
use gamecatalog_core::storage::{RepositoryError, Result};

/// Caches list pages under `{tag}_list-{page}-{limit}` and purges them by tag.
///
/// Reads are best-effort: a failing or corrupt cache degrades to a store
/// query. Invalidation is not, since a swallowed purge would leave stale
/// pages visible after a successful write.
#[derive(Clone)]
pub struct ListCache {
    cache: Arc<dyn Cache>,
    ttl: Option<Duration>,
}

impl ListCache {
    /// Creates a list cache over `cache`. `ttl` of `None` keeps pages until
    /// they are invalidated or evicted.
    pub fn new(cache: Arc<dyn Cache>, ttl: Option<Duration>) -> Self {
        Self { cache, ttl }
    }

    /// Returns the cached page, or runs `compute` and caches its result.
    ///
    /// Errors from `compute` are returned as-is and nothing is cached.
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        resource: Resource,
        pagination: Pagination,
        compute: F,
    ) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Vec<T>>> + Send,
    {
        let key = list_key(resource, pagination);

        match self.cache.get(&key).await {
            Ok(Some(bytes)) => match deserialize_page(&bytes) {
                Ok(items) => {
                    tracing::trace!(%key, "Cache hit for list page");
                    return Ok(items);
                }
                Err(err) => {
                    tracing::warn!(%key, error = %err, "Cached list page is corrupt");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%key, error = %err, "Cache read failed");
            }
        }

        tracing::trace!(%key, "Cache miss for list page");
        let items = compute().await?;

        match serialize_page(&items) {
            Ok(bytes) => {
                let tags = [cache_tag(resource)];
                if let Err(err) = self.cache.set(&key, &bytes, &tags, self.ttl).await {
                    tracing::warn!(%key, error = %err, "Failed to cache list page");
                }
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "Failed to serialize list page");
            }
        }

        Ok(items)
    }

    /// Purges every page affected by a write to `resource`.
    pub async fn invalidate(&self, resource: Resource) -> Result<()> {
        for tag in resource.invalidation_tags() {
            self.invalidate_tag(&tag).await?;
        }
        Ok(())
    }

    /// Purges every page stored under `tag`.
    pub async fn invalidate_tag(&self, tag: &str) -> Result<()> {
        self.cache.invalidate_tag(tag).await.map_err(|err| {
            tracing::error!(tag, error = %err, "Cache invalidation failed");
            RepositoryError::CacheInvalidation(err.to_string())
        })
    }
}
