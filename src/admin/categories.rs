use tracing::{info, instrument};

use super::error::AdminError;
use super::forms::CategoryForm;
use super::guard::SaveGuard;
use super::prompt::messages;
use super::AdminContext;
use crate::clients::CategoryClient;
use crate::domain::Category;
use crate::image_host::ImageFile;

/// The categories screen.
#[derive(Debug, Clone)]
pub struct CategoryAdmin {
    client: CategoryClient,
    ctx: AdminContext,
    guard: SaveGuard,
}

impl CategoryAdmin {
    pub fn new(client: CategoryClient, ctx: AdminContext) -> Self {
        Self {
            client,
            ctx,
            guard: SaveGuard::new(),
        }
    }

    /// Every category, inactive ones included, in display order.
    pub async fn list(&self) -> Result<Vec<Category>, AdminError> {
        self.ctx.require_admin()?;
        Ok(self.client.list_categories().await?)
    }

    /// A blank form positioned after the existing categories.
    pub async fn new_form(&self) -> Result<CategoryForm, AdminError> {
        self.ctx.require_admin()?;
        let count = self.client.count_categories().await?;
        Ok(CategoryForm::new(count as i64))
    }

    pub fn edit_form(&self, category: &Category) -> CategoryForm {
        CategoryForm::from_category(category)
    }

    /// Uploads the picked picture into the form. Failure leaves an empty image.
    pub async fn upload_image(&self, form: &mut CategoryForm, file: ImageFile) -> Result<(), AdminError> {
        self.ctx.require_admin()?;
        let _saving = self.guard.try_begin()?;
        form.image = self.ctx.upload_or_empty(file).await;
        Ok(())
    }

    /// Updates `editing` or inserts a new category at the end. Returns the record id.
    #[instrument(skip(self, form))]
    pub async fn submit(&self, editing: Option<&str>, form: CategoryForm) -> Result<String, AdminError> {
        self.ctx.require_admin()?;
        form.validate()?;
        let _saving = self.guard.try_begin()?;

        let mut payload = form.into_payload();
        let result = match editing {
            Some(id) => self.client.update_category(id, &payload).await.map(|_| id.to_string()),
            None => match self.client.count_categories().await {
                Ok(count) => {
                    payload.order = count as i64;
                    self.client.create_category(&payload).await
                }
                Err(e) => Err(e),
            },
        };

        let id = result.map_err(|e| self.ctx.report_write_failure("save category", e))?;
        info!(%id, "Category saved");
        Ok(id)
    }

    /// Removes the category after confirmation. `Ok(false)` when declined.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, AdminError> {
        self.ctx.require_admin()?;
        if !self.ctx.confirm_delete(messages::CONFIRM_DELETE_CATEGORY) {
            return Ok(false);
        }
        self.client
            .delete_category(id)
            .await
            .map_err(|e| self.ctx.report_write_failure("delete category", e))?;
        info!(id, "Category deleted");
        Ok(true)
    }

    /// Flips `isActive` with a single-field update.
    #[instrument(skip(self, category), fields(id = %category.id))]
    pub async fn toggle_active(&self, category: &Category) -> Result<(), AdminError> {
        self.ctx.require_admin()?;
        self.client
            .set_category_active(&category.id, !category.is_active)
            .await
            .map_err(|e| self.ctx.report_write_failure("toggle category", e))
    }

    pub fn is_saving(&self) -> bool {
        self.guard.is_saving()
    }
}
