use tracing::{info, instrument};

use super::error::AdminError;
use super::forms::MenuItemForm;
use super::guard::SaveGuard;
use super::prompt::messages;
use super::AdminContext;
use crate::clients::{CategoryClient, MenuItemClient};
use crate::domain::{Category, MenuItem};
use crate::image_host::ImageFile;

/// Category selector on the items list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// `"all"` selects everything; anything else is a category id.
    pub fn parse(value: &str) -> Self {
        match value {
            "all" | "" => CategoryFilter::All,
            id => CategoryFilter::Category(id.to_string()),
        }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => item.category_id == *id,
        }
    }
}

/// Arabic name of the item's category, or a placeholder when it is gone.
pub fn category_name<'a>(categories: &'a [Category], category_id: &str) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.name_ar.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(messages::UNKNOWN_CATEGORY)
}

/// The menu items screen.
#[derive(Debug, Clone)]
pub struct MenuItemAdmin {
    items: MenuItemClient,
    categories: CategoryClient,
    ctx: AdminContext,
    guard: SaveGuard,
}

impl MenuItemAdmin {
    pub fn new(items: MenuItemClient, categories: CategoryClient, ctx: AdminContext) -> Self {
        Self {
            items,
            categories,
            ctx,
            guard: SaveGuard::new(),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<MenuItem>, AdminError> {
        self.list(&CategoryFilter::All).await
    }

    /// Items in display order, restricted by `filter`.
    pub async fn list(&self, filter: &CategoryFilter) -> Result<Vec<MenuItem>, AdminError> {
        self.ctx.require_admin()?;
        let mut items = self.items.list_menu_items().await?;
        items.retain(|item| filter.matches(item));
        Ok(items)
    }

    /// A blank form in the first category, positioned after the existing items.
    pub async fn new_form(&self) -> Result<MenuItemForm, AdminError> {
        self.ctx.require_admin()?;
        let categories = self.categories.list_categories().await?;
        let count = self.items.count_menu_items().await?;
        let category_id = categories.first().map(|c| c.id.clone()).unwrap_or_default();
        Ok(MenuItemForm::new(category_id, count as i64))
    }

    pub fn edit_form(&self, item: &MenuItem) -> MenuItemForm {
        MenuItemForm::from_item(item)
    }

    /// Uploads the picked picture into the form. Failure leaves an empty image.
    pub async fn upload_image(&self, form: &mut MenuItemForm, file: ImageFile) -> Result<(), AdminError> {
        self.ctx.require_admin()?;
        let _saving = self.guard.try_begin()?;
        form.image = self.ctx.upload_or_empty(file).await;
        Ok(())
    }

    pub fn remove_image(&self, form: &mut MenuItemForm) {
        form.image.clear();
    }

    /// Updates `editing` or inserts a new item at the end. Returns the record id.
    #[instrument(skip(self, form))]
    pub async fn submit(&self, editing: Option<&str>, form: MenuItemForm) -> Result<String, AdminError> {
        self.ctx.require_admin()?;
        form.validate()?;
        let _saving = self.guard.try_begin()?;

        let mut payload = form.into_payload();
        let result = match editing {
            Some(id) => self.items.update_menu_item(id, &payload).await.map(|_| id.to_string()),
            None => match self.items.count_menu_items().await {
                Ok(count) => {
                    payload.order = count as i64;
                    self.items.create_menu_item(&payload).await
                }
                Err(e) => Err(e),
            },
        };

        let id = result.map_err(|e| self.ctx.report_write_failure("save menu item", e))?;
        info!(%id, "Menu item saved");
        Ok(id)
    }

    /// Removes the item after confirmation. `Ok(false)` when declined.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, AdminError> {
        self.ctx.require_admin()?;
        if !self.ctx.confirm_delete(messages::CONFIRM_DELETE_ITEM) {
            return Ok(false);
        }
        self.items
            .delete_menu_item(id)
            .await
            .map_err(|e| self.ctx.report_write_failure("delete menu item", e))?;
        info!(id, "Menu item deleted");
        Ok(true)
    }

    /// Flips `isAvailable` with a single-field update.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn toggle_available(&self, item: &MenuItem) -> Result<(), AdminError> {
        self.ctx.require_admin()?;
        self.items
            .set_menu_item_available(&item.id, !item.is_available)
            .await
            .map_err(|e| self.ctx.report_write_failure("toggle menu item", e))
    }

    pub fn is_saving(&self) -> bool {
        self.guard.is_saving()
    }
}
