use async_trait::async_trait;

use gamecatalog_core::cache::Resource;
use gamecatalog_core::catalog::{NewUser, User};
use gamecatalog_core::pagination::Pagination;
use gamecatalog_core::storage::{Result, UserRepository};

use super::CachedRepository;

#[async_trait]
impl<R> UserRepository for CachedRepository<R>
where
    R: UserRepository + 'static,
{
    async fn list_users(&self, pagination: Pagination) -> Result<Vec<User>> {
        self.lists
            .get_or_compute(Resource::Users, pagination, || {
                self.repository.list_users(pagination)
            })
            .await
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.repository.get_user(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.get_user_by_email(email).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let created = self.repository.create_user(user).await?;
        self.lists.invalidate(Resource::Users).await?;

        tracing::debug!(user_id = created.id, "User created");
        Ok(created)
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        self.repository.update_user(user).await?;
        self.lists.invalidate(Resource::Users).await?;

        tracing::debug!(user_id = user.id, "User updated");
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.repository.delete_user(id).await?;
        self.lists.invalidate(Resource::Users).await?;

        tracing::debug!(user_id = id, "User deleted");
        Ok(())
    }

    async fn find_newsletter_subscribers(&self) -> Result<Vec<User>> {
        self.repository.find_newsletter_subscribers().await
    }
}
