//! Cached repository decorator.
//!
//! Wraps a repository with list caching:
//!
//! - **List reads**: served from `{tag}_list-{page}-{limit}` keys, populated on miss
//! - **Writes**: persist to the repository, then purge the affected list tags
//! - **Everything else**: delegated untouched
//!
//! A write only returns once its invalidation succeeded, so a caller never
//! observes a stale page after a successful write.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let repo = Arc::new(InMemoryRepository::new());
//! let cache = Arc::new(MemoryCache::new(10_000));
//! let lists = ListCache::new(cache, Some(Duration::from_secs(3600)));
//!
//! let cached_repo = CachedRepository::new(repo, lists);
//! ```

mod category;
mod editor;
mod user;
mod video_game;

use std::sync::Arc;

use crate::cache::ListCache;

/// Cached repository decorator over every catalog repository trait.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
pub struct CachedRepository<R> {
    repository: Arc<R>,
    lists: ListCache,
}

impl<R> CachedRepository<R> {
    /// Creates a new cached repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `lists` - List cache shared with other decorators over the same store
    pub fn new(repository: Arc<R>, lists: ListCache) -> Self {
        Self { repository, lists }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use gamecatalog_core::catalog::{NewCategory, NewEditor, NewVideoGame};
    use gamecatalog_core::pagination::Pagination;
    use gamecatalog_core::storage::{CategoryRepository, EditorRepository, VideoGameRepository};

    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    fn setup() -> (CachedRepository<InMemoryRepository>, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        let lists = ListCache::new(Arc::new(MemoryCache::new(100)), None);
        (CachedRepository::new(repo.clone(), lists), repo)
    }

    fn game(title: &str) -> NewVideoGame {
        NewVideoGame::new(
            title,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "A description long enough",
        )
    }

    fn first_page() -> Pagination {
        Pagination::default()
    }

    #[tokio::test]
    async fn test_list_is_served_from_cache() {
        let (cached, inner) = setup();
        cached.create_video_game(game("First")).await.unwrap();
        assert_eq!(cached.list_video_games(first_page()).await.unwrap().len(), 1);

        // Bypass the decorator: the cached page must not see it.
        inner.create_video_game(game("Hidden")).await.unwrap();

        assert_eq!(cached.list_video_games(first_page()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_through_decorator_purges_list() {
        let (cached, _) = setup();
        assert!(cached.list_video_games(first_page()).await.unwrap().is_empty());

        cached.create_video_game(game("New")).await.unwrap();

        let games = cached.list_video_games(first_page()).await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].title, "New");
    }

    #[tokio::test]
    async fn test_editor_delete_purges_game_lists() {
        let (cached, _) = setup();
        let editor = cached
            .create_editor(NewEditor::new("Capcom", "Japan"))
            .await
            .unwrap();
        cached
            .create_video_game(game("Okami").with_editor(editor.id))
            .await
            .unwrap();
        let before = cached.list_video_games(first_page()).await.unwrap();
        assert_eq!(before[0].editor_id, Some(editor.id));

        cached.delete_editor(editor.id).await.unwrap();

        let after = cached.list_video_games(first_page()).await.unwrap();
        assert_eq!(after[0].editor_id, None);
        assert!(cached.list_editors(first_page()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_category_rename_purges_category_list() {
        let (cached, _) = setup();
        let mut category = cached
            .create_category(NewCategory::new("Platformer"))
            .await
            .unwrap();
        cached.list_categories(first_page()).await.unwrap();

        category.name = "Platform".to_string();
        cached.update_category(&category).await.unwrap();

        let categories = cached.list_categories(first_page()).await.unwrap();
        assert_eq!(categories[0].name, "Platform");
    }

    #[tokio::test]
    async fn test_failed_write_keeps_error() {
        let (cached, _) = setup();

        let result = cached.delete_video_game(404).await;

        assert!(result.is_err());
    }
}
