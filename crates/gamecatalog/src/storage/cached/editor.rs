use async_trait::async_trait;

use gamecatalog_core::cache::Resource;
use gamecatalog_core::catalog::{Editor, NewEditor};
use gamecatalog_core::pagination::Pagination;
use gamecatalog_core::storage::{EditorRepository, Result};

use super::CachedRepository;

// Editor writes purge game lists too, since games embed the editor reference.
#[async_trait]
impl<R> EditorRepository for CachedRepository<R>
where
    R: EditorRepository + 'static,
{
    async fn list_editors(&self, pagination: Pagination) -> Result<Vec<Editor>> {
        self.lists
            .get_or_compute(Resource::Editors, pagination, || {
                self.repository.list_editors(pagination)
            })
            .await
    }

    async fn get_editor(&self, id: i64) -> Result<Option<Editor>> {
        self.repository.get_editor(id).await
    }

    async fn create_editor(&self, editor: NewEditor) -> Result<Editor> {
        let created = self.repository.create_editor(editor).await?;
        self.lists.invalidate(Resource::Editors).await?;

        tracing::debug!(editor_id = created.id, "Editor created");
        Ok(created)
    }

    async fn update_editor(&self, editor: &Editor) -> Result<()> {
        self.repository.update_editor(editor).await?;
        self.lists.invalidate(Resource::Editors).await?;

        tracing::debug!(editor_id = editor.id, "Editor updated");
        Ok(())
    }

    async fn delete_editor(&self, id: i64) -> Result<()> {
        self.repository.delete_editor(id).await?;
        self.lists.invalidate(Resource::Editors).await?;

        tracing::debug!(editor_id = id, "Editor deleted");
        Ok(())
    }
}
