//! In-memory cache backend implementation.
//!
//! Provides a thread-safe in-memory cache with TTL support and tag
//! invalidation for single-instance deployments.

mod cache;

pub use cache::MemoryCache;
