//! SQLite repository implementation.
//!
//! Implements the repository traits from `gamecatalog_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use gamecatalog_core::catalog::{
    Category, Editor, NewCategory, NewEditor, NewUser, NewVideoGame, User, VideoGame,
};
use gamecatalog_core::pagination::Pagination;
use gamecatalog_core::storage::{
    CategoryRepository, DateRange, EditorRepository, RepositoryError, Result, UserRepository,
    VideoGameRepository,
};

use super::conversions::{
    format_date, format_datetime, roles_to_string, row_to_category, row_to_editor, row_to_user,
    row_to_video_game,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// LIMIT and OFFSET bind values for a page.
fn page_params(pagination: Pagination) -> (i64, i64) {
    (
        i64::from(pagination.limit),
        i64::try_from(pagination.offset()).unwrap_or(i64::MAX),
    )
}

/// Runs a query returning many rows and collects them.
fn query_all<T, P>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
    map: fn(&rusqlite::Row) -> rusqlite::Result<T>,
) -> std::result::Result<Vec<T>, tokio_rusqlite::Error>
where
    P: rusqlite::Params,
{
    let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
    let rows = stmt.query_map(params, map).map_err(wrap_err)?;

    let mut items = Vec::new();
    for row_result in rows {
        items.push(row_result.map_err(wrap_err)?);
    }
    Ok(items)
}

/// Runs a query returning at most one row.
fn query_optional<T, P>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
    map: fn(&rusqlite::Row) -> rusqlite::Result<T>,
) -> std::result::Result<Option<T>, tokio_rusqlite::Error>
where
    P: rusqlite::Params,
{
    let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
    match stmt.query_row(params, map) {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(wrap_err(e)),
    }
}

/// Fails with `QueryReturnedNoRows` when a write touched nothing.
fn expect_affected(rows: usize) -> std::result::Result<(), tokio_rusqlite::Error> {
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

/// Replaces the category associations of a game.
fn replace_categories(
    tx: &rusqlite::Transaction<'_>,
    game_id: i64,
    category_ids: &[i64],
) -> std::result::Result<(), tokio_rusqlite::Error> {
    tx.execute(schema::DELETE_VIDEO_GAME_CATEGORIES, [game_id])
        .map_err(wrap_err)?;
    for category_id in category_ids {
        tx.execute(
            schema::INSERT_VIDEO_GAME_CATEGORY,
            rusqlite::params![game_id, category_id],
        )
        .map_err(wrap_err)?;
    }
    Ok(())
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Enables foreign keys and creates the schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::PRAGMAS).map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// VideoGameRepository implementation
// ============================================================================

#[async_trait]
impl VideoGameRepository for SqliteRepository {
    async fn list_video_games(&self, pagination: Pagination) -> Result<Vec<VideoGame>> {
        let (limit, offset) = page_params(pagination);

        self.conn
            .call(move |conn| {
                query_all(
                    conn,
                    schema::SELECT_VIDEO_GAMES_PAGE,
                    [limit, offset],
                    row_to_video_game,
                )
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn get_video_game(&self, id: i64) -> Result<Option<VideoGame>> {
        self.conn
            .call(move |conn| {
                query_optional(conn, schema::SELECT_VIDEO_GAME_BY_ID, [id], row_to_video_game)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "VideoGame", id.to_string()))
    }

    async fn create_video_game(&self, game: NewVideoGame) -> Result<VideoGame> {
        let title = game.title.clone();
        let release_date = format_date(&game.release_date);
        let description = game.description.clone();
        let cover_image = game.cover_image.clone();
        let updated_at = format_datetime(&game.updated_at);
        let editor_id = game.editor_id;
        let category_ids = game.category_ids.clone();

        let id = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute(
                    schema::INSERT_VIDEO_GAME,
                    rusqlite::params![
                        title,
                        release_date,
                        description,
                        cover_image,
                        updated_at,
                        editor_id
                    ],
                )
                .map_err(wrap_err)?;
                let id = tx.last_insert_rowid();
                replace_categories(&tx, id, &category_ids)?;
                tx.commit().map_err(wrap_err)?;
                Ok(id)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "VideoGame", "new"))?;

        Ok(game.into_video_game(id))
    }

    async fn update_video_game(&self, game: &VideoGame) -> Result<()> {
        let id = game.id;
        let title = game.title.clone();
        let release_date = format_date(&game.release_date);
        let description = game.description.clone();
        let cover_image = game.cover_image.clone();
        let updated_at = format_datetime(&game.updated_at);
        let editor_id = game.editor_id;
        let category_ids = game.category_ids.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let rows = tx
                    .execute(
                        schema::UPDATE_VIDEO_GAME,
                        rusqlite::params![
                            id,
                            title,
                            release_date,
                            description,
                            cover_image,
                            updated_at,
                            editor_id
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_affected(rows)?;
                replace_categories(&tx, id, &category_ids)?;
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "VideoGame", id.to_string()))
    }

    async fn delete_video_game(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_VIDEO_GAME, [id])
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "VideoGame", id.to_string()))
    }

    async fn find_released_between(&self, range: DateRange) -> Result<Vec<VideoGame>> {
        let start = format_date(&range.start);
        let end = format_date(&range.end);

        self.conn
            .call(move |conn| {
                query_all(
                    conn,
                    schema::SELECT_VIDEO_GAMES_RELEASED_BETWEEN,
                    [&start, &end],
                    row_to_video_game,
                )
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn list_video_games_by_editor(&self, editor_id: i64) -> Result<Vec<VideoGame>> {
        self.conn
            .call(move |conn| {
                query_all(
                    conn,
                    schema::SELECT_VIDEO_GAMES_BY_EDITOR,
                    [editor_id],
                    row_to_video_game,
                )
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn list_video_games_by_category(&self, category_id: i64) -> Result<Vec<VideoGame>> {
        self.conn
            .call(move |conn| {
                query_all(
                    conn,
                    schema::SELECT_VIDEO_GAMES_BY_CATEGORY,
                    [category_id],
                    row_to_video_game,
                )
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn count_video_games(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .call(|conn| {
                conn.query_row(schema::COUNT_VIDEO_GAMES, [], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

// ============================================================================
// EditorRepository implementation
// ============================================================================

#[async_trait]
impl EditorRepository for SqliteRepository {
    async fn list_editors(&self, pagination: Pagination) -> Result<Vec<Editor>> {
        let (limit, offset) = page_params(pagination);

        self.conn
            .call(move |conn| {
                query_all(conn, schema::SELECT_EDITORS_PAGE, [limit, offset], row_to_editor)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn get_editor(&self, id: i64) -> Result<Option<Editor>> {
        self.conn
            .call(move |conn| query_optional(conn, schema::SELECT_EDITOR_BY_ID, [id], row_to_editor))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Editor", id.to_string()))
    }

    async fn create_editor(&self, editor: NewEditor) -> Result<Editor> {
        let name = editor.name.clone();
        let country = editor.country.clone();

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(schema::INSERT_EDITOR, [&name, &country])
                    .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Editor", "new"))?;

        Ok(editor.into_editor(id))
    }

    async fn update_editor(&self, editor: &Editor) -> Result<()> {
        let id = editor.id;
        let name = editor.name.clone();
        let country = editor.country.clone();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_EDITOR, rusqlite::params![id, name, country])
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Editor", id.to_string()))
    }

    async fn delete_editor(&self, id: i64) -> Result<()> {
        // ON DELETE SET NULL clears video_games.editor_id.
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_EDITOR, [id])
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Editor", id.to_string()))
    }
}

// ============================================================================
// CategoryRepository implementation
// ============================================================================

#[async_trait]
impl CategoryRepository for SqliteRepository {
    async fn list_categories(&self, pagination: Pagination) -> Result<Vec<Category>> {
        let (limit, offset) = page_params(pagination);

        self.conn
            .call(move |conn| {
                query_all(
                    conn,
                    schema::SELECT_CATEGORIES_PAGE,
                    [limit, offset],
                    row_to_category,
                )
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        self.conn
            .call(move |conn| {
                query_optional(conn, schema::SELECT_CATEGORY_BY_ID, [id], row_to_category)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Category", id.to_string()))
    }

    async fn get_categories(&self, ids: &[i64]) -> Result<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.to_vec();

        self.conn
            .call(move |conn| {
                let placeholders = vec!["?"; ids.len()].join(", ");
                let sql = format!(
                    "SELECT id, name FROM categories WHERE id IN ({placeholders}) ORDER BY id"
                );
                query_all(
                    conn,
                    &sql,
                    rusqlite::params_from_iter(ids.iter()),
                    row_to_category,
                )
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category> {
        let name = category.name.clone();

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(schema::INSERT_CATEGORY, [&name])
                    .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Category", "new"))?;

        Ok(category.into_category(id))
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        let id = category.id;
        let name = category.name.clone();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_CATEGORY, rusqlite::params![id, name])
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Category", id.to_string()))
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        // Join rows cascade.
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_CATEGORY, [id])
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Category", id.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn list_users(&self, pagination: Pagination) -> Result<Vec<User>> {
        let (limit, offset) = page_params(pagination);

        self.conn
            .call(move |conn| query_all(conn, schema::SELECT_USERS_PAGE, [limit, offset], row_to_user))
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.conn
            .call(move |conn| query_optional(conn, schema::SELECT_USER_BY_ID, [id], row_to_user))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        let email_for_error = email.clone();

        self.conn
            .call(move |conn| {
                query_optional(conn, schema::SELECT_USER_BY_EMAIL, [&email], row_to_user)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", email_for_error))
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let email = user.email.clone();
        let password_hash = user.password_hash.clone();
        let roles = roles_to_string(&user.roles);
        let newsletter = user.newsletter;
        let email_for_error = user.email.clone();

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![email, password_hash, roles, newsletter],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", email_for_error))?;

        Ok(user.into_user(id))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let id = user.id;
        let email = user.email.clone();
        let password_hash = user.password_hash.clone();
        let roles = roles_to_string(&user.roles);
        let newsletter = user.newsletter;

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_USER,
                        rusqlite::params![id, email, password_hash, roles, newsletter],
                    )
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| match map_tokio_rusqlite_error(e, "User", id.to_string()) {
                RepositoryError::AlreadyExists { entity_type, .. } => {
                    RepositoryError::AlreadyExists {
                        entity_type,
                        id: user.email.clone(),
                    }
                }
                other => other,
            })
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_USER, [id]).map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn find_newsletter_subscribers(&self) -> Result<Vec<User>> {
        self.conn
            .call(|conn| query_all(conn, schema::SELECT_NEWSLETTER_SUBSCRIBERS, [], row_to_user))
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gamecatalog_core::catalog::Role;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn game(title: &str, release_date: NaiveDate) -> NewVideoGame {
        NewVideoGame::new(title, release_date, "A description long enough")
    }

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_video_game_with_relations() {
        let repo = repo().await;
        let editor = repo.create_editor(NewEditor::new("Nintendo", "Japan")).await.unwrap();
        let rpg = repo.create_category(NewCategory::new("RPG")).await.unwrap();
        let action = repo.create_category(NewCategory::new("Action")).await.unwrap();

        let created = repo
            .create_video_game(
                game("Zelda", date(2017, 3, 3))
                    .with_editor(editor.id)
                    .with_categories([action.id, rpg.id])
                    .with_cover_image("zelda.png"),
            )
            .await
            .unwrap();

        let fetched = repo.get_video_game(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Zelda");
        assert_eq!(fetched.editor_id, Some(editor.id));
        assert_eq!(fetched.category_ids, vec![rpg.id, action.id]);
        assert_eq!(fetched.cover_image.as_deref(), Some("zelda.png"));
        assert_eq!(fetched.updated_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_get_missing_video_game_is_none() {
        let repo = repo().await;
        assert!(repo.get_video_game(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_editor_is_invalid_data() {
        let repo = repo().await;

        let result = repo
            .create_video_game(game("Orphan", date(2020, 1, 1)).with_editor(99))
            .await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_update_replaces_categories() {
        let repo = repo().await;
        let a = repo.create_category(NewCategory::new("A")).await.unwrap();
        let b = repo.create_category(NewCategory::new("B")).await.unwrap();
        let mut created = repo
            .create_video_game(game("Game", date(2020, 1, 1)).with_categories([a.id]))
            .await
            .unwrap();

        created.category_ids = vec![b.id];
        created.title = "Renamed".to_string();
        repo.update_video_game(&created).await.unwrap();

        let fetched = repo.get_video_game(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Renamed");
        assert_eq!(fetched.category_ids, vec![b.id]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;
        let ghost = game("Ghost", date(2020, 1, 1)).into_video_game(77);

        let result = repo.update_video_game(&ghost).await;

        assert_eq!(
            result,
            Err(RepositoryError::NotFound {
                entity_type: "VideoGame",
                id: "77".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_list_pages_ordered_by_id() {
        let repo = repo().await;
        for i in 0..5 {
            repo.create_video_game(game(&format!("Game {i}"), date(2020, 1, 1)))
                .await
                .unwrap();
        }

        let page = repo
            .list_video_games(Pagination::new(2, 2).unwrap())
            .await
            .unwrap();

        let titles: Vec<&str> = page.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Game 2", "Game 3"]);
        assert_eq!(repo.count_video_games().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_find_released_between_bounds() {
        let repo = repo().await;
        for (title, d) in [
            ("yesterday", date(2024, 3, 9)),
            ("today", date(2024, 3, 10)),
            ("in a week", date(2024, 3, 17)),
            ("in eight days", date(2024, 3, 18)),
        ] {
            repo.create_video_game(game(title, d)).await.unwrap();
        }

        let range = DateRange::forward(date(2024, 3, 10), 7).unwrap();
        let found = repo.find_released_between(range).await.unwrap();

        let titles: Vec<&str> = found.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["today", "in a week"]);
    }

    #[tokio::test]
    async fn test_delete_editor_nulls_reference() {
        let repo = repo().await;
        let editor = repo.create_editor(NewEditor::new("Sega", "Japan")).await.unwrap();
        let created = repo
            .create_video_game(game("Sonic", date(1991, 6, 23)).with_editor(editor.id))
            .await
            .unwrap();

        repo.delete_editor(editor.id).await.unwrap();

        let fetched = repo.get_video_game(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.editor_id, None);
        assert!(repo
            .list_video_games_by_editor(editor.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_category_and_game_cascade_join_rows() {
        let repo = repo().await;
        let rpg = repo.create_category(NewCategory::new("RPG")).await.unwrap();
        let keep = repo.create_category(NewCategory::new("Keep")).await.unwrap();
        let created = repo
            .create_video_game(game("Zelda", date(2017, 3, 3)).with_categories([rpg.id, keep.id]))
            .await
            .unwrap();

        repo.delete_category(rpg.id).await.unwrap();
        let fetched = repo.get_video_game(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.category_ids, vec![keep.id]);

        repo.delete_video_game(created.id).await.unwrap();
        assert!(repo
            .list_video_games_by_category(keep.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_get_categories_returns_existing_subset() {
        let repo = repo().await;
        let a = repo.create_category(NewCategory::new("A")).await.unwrap();
        let b = repo.create_category(NewCategory::new("B")).await.unwrap();

        let found = repo.get_categories(&[b.id, 999, a.id]).await.unwrap();

        assert_eq!(found, vec![a, b]);
        assert!(repo.get_categories(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_round_trip_and_duplicate_email() {
        let repo = repo().await;
        let created = repo
            .create_user(
                NewUser::new("admin@example.com", "hash")
                    .with_roles([Role::Admin])
                    .with_newsletter(true),
            )
            .await
            .unwrap();

        let fetched = repo
            .get_user_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.is_admin());

        let duplicate = repo
            .create_user(NewUser::new("admin@example.com", "other"))
            .await;
        assert_eq!(
            duplicate,
            Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: "admin@example.com".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_newsletter_subscribers_only() {
        let repo = repo().await;
        repo.create_user(NewUser::new("in@example.com", "h").with_newsletter(true))
            .await
            .unwrap();
        repo.create_user(NewUser::new("out@example.com", "h"))
            .await
            .unwrap();

        let subscribers = repo.find_newsletter_subscribers().await.unwrap();

        assert_eq!(subscribers.len(), 1);
        assert_eq!(subscribers[0].email, "in@example.com");
    }
}
