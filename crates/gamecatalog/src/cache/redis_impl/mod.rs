//! Redis cache backend implementation.
//!
//! Provides a shared cache using Redis for multi-instance deployments.
//! Tags are emulated with one tracking set per tag.

mod cache;
mod error;

pub use cache::RedisCache;
