use async_trait::async_trait;

use crate::catalog::{
    Category, Editor, NewCategory, NewEditor, NewUser, NewVideoGame, User, VideoGame,
};
use crate::pagination::Pagination;

use super::{DateRange, Result};

/// Repository for video game operations.
#[async_trait]
pub trait VideoGameRepository: Send + Sync {
    /// Lists one page of games ordered by id.
    async fn list_video_games(&self, pagination: Pagination) -> Result<Vec<VideoGame>>;

    /// Gets a game by its ID.
    async fn get_video_game(&self, id: i64) -> Result<Option<VideoGame>>;

    /// Stores a new game and returns it with its assigned ID.
    async fn create_video_game(&self, game: NewVideoGame) -> Result<VideoGame>;

    /// Updates an existing game, replacing its category associations.
    async fn update_video_game(&self, game: &VideoGame) -> Result<()>;

    /// Deletes a game and its category associations.
    async fn delete_video_game(&self, id: i64) -> Result<()>;

    /// Gets every game whose release date lies in `range`, bounds included.
    async fn find_released_between(&self, range: DateRange) -> Result<Vec<VideoGame>>;

    /// Gets every game published by an editor.
    async fn list_video_games_by_editor(&self, editor_id: i64) -> Result<Vec<VideoGame>>;

    /// Gets every game attached to a category.
    async fn list_video_games_by_category(&self, category_id: i64) -> Result<Vec<VideoGame>>;

    /// Counts stored games.
    async fn count_video_games(&self) -> Result<u64>;
}

/// Repository for editor operations.
#[async_trait]
pub trait EditorRepository: Send + Sync {
    async fn list_editors(&self, pagination: Pagination) -> Result<Vec<Editor>>;

    async fn get_editor(&self, id: i64) -> Result<Option<Editor>>;

    async fn create_editor(&self, editor: NewEditor) -> Result<Editor>;

    async fn update_editor(&self, editor: &Editor) -> Result<()>;

    /// Deletes an editor. Its games are kept with no editor.
    async fn delete_editor(&self, id: i64) -> Result<()>;
}

/// Repository for category operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self, pagination: Pagination) -> Result<Vec<Category>>;

    async fn get_category(&self, id: i64) -> Result<Option<Category>>;

    /// Gets the categories among `ids` that exist, ordered by id.
    async fn get_categories(&self, ids: &[i64]) -> Result<Vec<Category>>;

    async fn create_category(&self, category: NewCategory) -> Result<Category>;

    async fn update_category(&self, category: &Category) -> Result<()>;

    /// Deletes a category and detaches it from every game.
    async fn delete_category(&self, id: i64) -> Result<()>;
}

/// Repository for user operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self, pagination: Pagination) -> Result<Vec<User>>;

    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Gets a user by their email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Stores a new user. Fails with `AlreadyExists` if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    async fn update_user(&self, user: &User) -> Result<()>;

    async fn delete_user(&self, id: i64) -> Result<()>;

    /// Gets every user subscribed to the newsletter.
    async fn find_newsletter_subscribers(&self) -> Result<Vec<User>>;
}
