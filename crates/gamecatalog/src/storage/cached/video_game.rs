use async_trait::async_trait;

use gamecatalog_core::cache::Resource;
use gamecatalog_core::catalog::{NewVideoGame, VideoGame};
use gamecatalog_core::pagination::Pagination;
use gamecatalog_core::storage::{DateRange, Result, VideoGameRepository};

use super::CachedRepository;

#[async_trait]
impl<R> VideoGameRepository for CachedRepository<R>
where
    R: VideoGameRepository + 'static,
{
    async fn list_video_games(&self, pagination: Pagination) -> Result<Vec<VideoGame>> {
        self.lists
            .get_or_compute(Resource::VideoGames, pagination, || {
                self.repository.list_video_games(pagination)
            })
            .await
    }

    async fn get_video_game(&self, id: i64) -> Result<Option<VideoGame>> {
        self.repository.get_video_game(id).await
    }

    async fn create_video_game(&self, game: NewVideoGame) -> Result<VideoGame> {
        let created = self.repository.create_video_game(game).await?;
        self.lists.invalidate(Resource::VideoGames).await?;

        tracing::debug!(video_game_id = created.id, "Video game created");
        Ok(created)
    }

    async fn update_video_game(&self, game: &VideoGame) -> Result<()> {
        self.repository.update_video_game(game).await?;
        self.lists.invalidate(Resource::VideoGames).await?;

        tracing::debug!(video_game_id = game.id, "Video game updated");
        Ok(())
    }

    async fn delete_video_game(&self, id: i64) -> Result<()> {
        self.repository.delete_video_game(id).await?;
        self.lists.invalidate(Resource::VideoGames).await?;

        tracing::debug!(video_game_id = id, "Video game deleted");
        Ok(())
    }

    async fn find_released_between(&self, range: DateRange) -> Result<Vec<VideoGame>> {
        self.repository.find_released_between(range).await
    }

    async fn list_video_games_by_editor(&self, editor_id: i64) -> Result<Vec<VideoGame>> {
        self.repository.list_video_games_by_editor(editor_id).await
    }

    async fn list_video_games_by_category(&self, category_id: i64) -> Result<Vec<VideoGame>> {
        self.repository.list_video_games_by_category(category_id).await
    }

    async fn count_video_games(&self) -> Result<u64> {
        self.repository.count_video_games().await
    }
}
