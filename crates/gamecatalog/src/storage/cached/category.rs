use async_trait::async_trait;

use gamecatalog_core::cache::Resource;
use gamecatalog_core::catalog::{Category, NewCategory};
use gamecatalog_core::pagination::Pagination;
use gamecatalog_core::storage::{CategoryRepository, Result};

use super::CachedRepository;

#[async_trait]
impl<R> CategoryRepository for CachedRepository<R>
where
    R: CategoryRepository + 'static,
{
    async fn list_categories(&self, pagination: Pagination) -> Result<Vec<Category>> {
        self.lists
            .get_or_compute(Resource::Categories, pagination, || {
                self.repository.list_categories(pagination)
            })
            .await
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        self.repository.get_category(id).await
    }

    async fn get_categories(&self, ids: &[i64]) -> Result<Vec<Category>> {
        self.repository.get_categories(ids).await
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category> {
        let created = self.repository.create_category(category).await?;
        self.lists.invalidate(Resource::Categories).await?;

        tracing::debug!(category_id = created.id, "Category created");
        Ok(created)
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        self.repository.update_category(category).await?;
        self.lists.invalidate(Resource::Categories).await?;

        tracing::debug!(category_id = category.id, "Category updated");
        Ok(())
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.repository.delete_category(id).await?;
        self.lists.invalidate(Resource::Categories).await?;

        tracing::debug!(category_id = id, "Category deleted");
        Ok(())
    }
}
