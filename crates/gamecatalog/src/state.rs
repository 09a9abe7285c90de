//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds the cached store behind a trait object and
//! supports different backend combinations via feature flags.

use std::{path::PathBuf, sync::Arc};

use tokio::sync::broadcast;

use crate::{
    auth::TokenService, config::Config, mailer, notifier::ReleaseNotifier, storage::Store,
};

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

// Cache features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!("Cannot enable both 'memory' and 'redis' cache features");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!("Must enable exactly one cache feature: 'memory' or 'redis'");

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Catalog and user store (cached, wraps underlying storage).
    pub store: Arc<dyn Store>,
    /// Access token issuer/verifier.
    pub tokens: TokenService,
    /// Release newsletter, shared by the scheduler and the CLI.
    pub notifier: Arc<ReleaseNotifier>,
    /// Directory receiving uploaded cover images.
    pub cover_dir: Arc<PathBuf>,
    /// Shutdown signal sender for background tasks.
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Creates a new AppState around an already cached store.
    fn build(store: Arc<dyn Store>, config: &Config) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let notifier = Arc::new(ReleaseNotifier::new(
            store.clone(),
            mailer::from_config(config),
        ));

        Self {
            store,
            tokens: TokenService::new(&config.jwt_secret, config.jwt_ttl()),
            notifier,
            cover_dir: Arc::new(config.cover_dir.clone()),
            shutdown_tx,
        }
    }

    /// Subscribe to shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal all background tasks to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::{ListCache, MemoryCache};
    use crate::storage::{CachedRepository, SqliteRepository};

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));
            let lists = ListCache::new(memory_cache, config.cache_ttl());

            tracing::info!(path = %config.sqlite_path, "Using SQLite storage with in-memory cache");
            Ok(Self::build(
                Arc::new(CachedRepository::new(sqlite_repo, lists)),
                config,
            ))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::{ListCache, RedisCache};
    use crate::storage::{CachedRepository, SqliteRepository};

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);
            let lists = ListCache::new(redis_cache, config.cache_ttl());

            tracing::info!(path = %config.sqlite_path, "Using SQLite storage with Redis cache");
            Ok(Self::build(
                Arc::new(CachedRepository::new(sqlite_repo, lists)),
                config,
            ))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::{ListCache, MemoryCache};
    use crate::storage::{CachedRepository, InMemoryRepository};

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for development without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));
            let lists = ListCache::new(memory_cache, config.cache_ttl());

            tracing::info!("Using in-memory storage with in-memory cache");
            Ok(Self::build(
                Arc::new(CachedRepository::new(inmemory_repo, lists)),
                config,
            ))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::{ListCache, RedisCache};
    use crate::storage::{CachedRepository, InMemoryRepository};

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);
            let lists = ListCache::new(redis_cache, config.cache_ttl());

            tracing::info!("Using in-memory storage with Redis cache");
            Ok(Self::build(
                Arc::new(CachedRepository::new(inmemory_repo, lists)),
                config,
            ))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================
