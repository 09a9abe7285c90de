//! Demo catalog loaded into an empty store at startup.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use gamecatalog_core::catalog::{
    seed_categories, seed_editors, seed_users, seed_video_games, NewUser,
};
use gamecatalog_core::pagination::Pagination;
use gamecatalog_core::storage::{
    CategoryRepository, EditorRepository, UserRepository, VideoGameRepository,
};

use crate::{auth::hash_password, storage::Store};

/// Seeds fixtures unless the store already holds games or users.
///
/// Returns whether anything was written. Release dates of upcoming demo
/// games are relative to `today`.
pub async fn seed_demo_data(store: &dyn Store, today: NaiveDate) -> Result<bool> {
    let has_games = store.count_video_games().await? > 0;
    let has_users = !store.list_users(Pagination::default()).await?.is_empty();
    if has_games || has_users {
        tracing::debug!("Store not empty, skipping demo data");
        return Ok(false);
    }

    let mut editor_ids = Vec::new();
    for editor in seed_editors() {
        editor_ids.push(store.create_editor(editor).await?.id);
    }

    let mut category_ids = Vec::new();
    for category in seed_categories() {
        category_ids.push(store.create_category(category).await?.id);
    }

    let games = seed_video_games(today, &editor_ids, &category_ids);
    let game_count = games.len();
    for game in games {
        store.create_video_game(game).await?;
    }

    let users = seed_users();
    let user_count = users.len();
    for user in users {
        let hash = hash_password(user.password)
            .map_err(|e| anyhow!("Failed to hash password of {}: {e}", user.email))?;
        store
            .create_user(
                NewUser::new(user.email, hash)
                    .with_roles(user.roles.iter().copied())
                    .with_newsletter(user.newsletter),
            )
            .await?;
    }

    tracing::info!(
        editors = editor_ids.len(),
        categories = category_ids.len(),
        video_games = game_count,
        users = user_count,
        "Demo data loaded"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::storage::InMemoryRepository;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[tokio::test]
    async fn test_seeds_empty_store_once() {
        let store = InMemoryRepository::new();

        assert!(seed_demo_data(&store, today()).await.unwrap());
        let games = store.count_video_games().await.unwrap();
        assert!(games > 0);

        assert!(!seed_demo_data(&store, today()).await.unwrap());
        assert_eq!(store.count_video_games().await.unwrap(), games);
    }

    #[tokio::test]
    async fn test_demo_accounts_are_usable() {
        let store = InMemoryRepository::new();
        seed_demo_data(&store, today()).await.unwrap();

        let admin = store
            .get_user_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();

        assert!(admin.is_admin());
        assert!(crate::auth::verify_password("admin", &admin.password_hash));
        assert_eq!(store.find_newsletter_subscribers().await.unwrap().len(), 2);
    }
}
