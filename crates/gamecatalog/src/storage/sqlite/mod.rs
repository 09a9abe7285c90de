//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of the repository traits
//! using `rusqlite` for synchronous operations and `tokio-rusqlite` for async wrapping.
//! Foreign keys are enabled on the connection so editor and category deletes
//! propagate to `video_games` and the join table.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
