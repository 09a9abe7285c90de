//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gamecatalog_core::catalog::{
    Category, Editor, NewCategory, NewEditor, NewUser, NewVideoGame, User, VideoGame,
};
use gamecatalog_core::pagination::Pagination;
use gamecatalog_core::storage::{
    CategoryRepository, DateRange, EditorRepository, RepositoryError, Result, UserRepository,
    VideoGameRepository,
};

/// All tables live behind one lock so cascades (editor delete, category
/// delete) are applied atomically.
#[derive(Debug, Default)]
struct Tables {
    video_games: BTreeMap<i64, VideoGame>,
    editors: BTreeMap<i64, Editor>,
    categories: BTreeMap<i64, Category>,
    users: BTreeMap<i64, User>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn check_references(&self, game: &VideoGame) -> Result<()> {
        if let Some(editor_id) = game.editor_id {
            if !self.editors.contains_key(&editor_id) {
                return Err(RepositoryError::InvalidData(format!(
                    "unknown editor {editor_id}"
                )));
            }
        }
        if let Some(id) = game
            .category_ids
            .iter()
            .find(|id| !self.categories.contains_key(id))
        {
            return Err(RepositoryError::InvalidData(format!("unknown category {id}")));
        }
        Ok(())
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

fn not_found(entity_type: &'static str, id: i64) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type,
        id: id.to_string(),
    }
}

/// In-memory storage backend.
///
/// Uses ordered maps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoGameRepository for InMemoryRepository {
    async fn list_video_games(&self, pagination: Pagination) -> Result<Vec<VideoGame>> {
        let tables = self.tables.read().await;
        let all: Vec<VideoGame> = tables.video_games.values().cloned().collect();
        Ok(pagination.apply(&all))
    }

    async fn get_video_game(&self, id: i64) -> Result<Option<VideoGame>> {
        let tables = self.tables.read().await;
        Ok(tables.video_games.get(&id).cloned())
    }

    async fn create_video_game(&self, game: NewVideoGame) -> Result<VideoGame> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let game = game.into_video_game(id);
        tables.check_references(&game)?;
        tables.video_games.insert(id, game.clone());
        Ok(game)
    }

    async fn update_video_game(&self, game: &VideoGame) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.video_games.contains_key(&game.id) {
            return Err(not_found("VideoGame", game.id));
        }
        tables.check_references(game)?;
        let mut stored = game.clone();
        stored.category_ids.sort_unstable();
        stored.category_ids.dedup();
        tables.video_games.insert(game.id, stored);
        Ok(())
    }

    async fn delete_video_game(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .video_games
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("VideoGame", id))
    }

    async fn find_released_between(&self, range: DateRange) -> Result<Vec<VideoGame>> {
        let tables = self.tables.read().await;
        Ok(tables
            .video_games
            .values()
            .filter(|g| range.contains(g.release_date))
            .cloned()
            .collect())
    }

    async fn list_video_games_by_editor(&self, editor_id: i64) -> Result<Vec<VideoGame>> {
        let tables = self.tables.read().await;
        Ok(tables
            .video_games
            .values()
            .filter(|g| g.editor_id == Some(editor_id))
            .cloned()
            .collect())
    }

    async fn list_video_games_by_category(&self, category_id: i64) -> Result<Vec<VideoGame>> {
        let tables = self.tables.read().await;
        Ok(tables
            .video_games
            .values()
            .filter(|g| g.has_category(category_id))
            .cloned()
            .collect())
    }

    async fn count_video_games(&self) -> Result<u64> {
        let tables = self.tables.read().await;
        Ok(tables.video_games.len() as u64)
    }
}

#[async_trait]
impl EditorRepository for InMemoryRepository {
    async fn list_editors(&self, pagination: Pagination) -> Result<Vec<Editor>> {
        let tables = self.tables.read().await;
        let all: Vec<Editor> = tables.editors.values().cloned().collect();
        Ok(pagination.apply(&all))
    }

    async fn get_editor(&self, id: i64) -> Result<Option<Editor>> {
        let tables = self.tables.read().await;
        Ok(tables.editors.get(&id).cloned())
    }

    async fn create_editor(&self, editor: NewEditor) -> Result<Editor> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let editor = editor.into_editor(id);
        tables.editors.insert(id, editor.clone());
        Ok(editor)
    }

    async fn update_editor(&self, editor: &Editor) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.editors.get_mut(&editor.id) {
            Some(stored) => {
                *stored = editor.clone();
                Ok(())
            }
            None => Err(not_found("Editor", editor.id)),
        }
    }

    async fn delete_editor(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.editors.remove(&id).is_none() {
            return Err(not_found("Editor", id));
        }
        for game in tables.video_games.values_mut() {
            if game.editor_id == Some(id) {
                game.editor_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self, pagination: Pagination) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        let all: Vec<Category> = tables.categories.values().cloned().collect();
        Ok(pagination.apply(&all))
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn get_categories(&self, ids: &[i64]) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let category = category.into_category(id);
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.categories.get_mut(&category.id) {
            Some(stored) => {
                *stored = category.clone();
                Ok(())
            }
            None => Err(not_found("Category", category.id)),
        }
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Err(not_found("Category", id));
        }
        for game in tables.video_games.values_mut() {
            game.category_ids.retain(|c| *c != id);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn list_users(&self, pagination: Pagination) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        let all: Vec<User> = tables.users.values().cloned().collect();
        Ok(pagination.apply(&all))
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email,
            });
        }
        let id = tables.next_id();
        let user = user.into_user(id);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(not_found("User", user.id));
        }
        if tables.email_taken(&user.email, Some(user.id)) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email.clone(),
            });
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("User", id))
    }

    async fn find_newsletter_subscribers(&self) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| u.newsletter)
            .cloned()
            .collect())
    }
}
