//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `gamecatalog_core::storage`. The implementations are selected
//! at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local tables behind a `RwLock`
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p gamecatalog --no-default-features --features sqlite,memory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p gamecatalog --features sqlite"
);

pub mod cached;

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "inmemory"))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

pub use cached::CachedRepository;

use gamecatalog_core::storage::{
    CategoryRepository, EditorRepository, UserRepository, VideoGameRepository,
};

/// Every repository the server needs, behind one trait object.
pub trait Store:
    VideoGameRepository + EditorRepository + CategoryRepository + UserRepository
{
}

impl<T> Store for T where
    T: VideoGameRepository + EditorRepository + CategoryRepository + UserRepository
{
}
