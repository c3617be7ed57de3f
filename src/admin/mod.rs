//! Admin panel: CRUD over categories, menu items and site settings.
//!
//! Every operation requires a signed-in admin. Forms are validated before
//! anything is written, images are uploaded before the record referencing
//! them is built, and deletes ask for confirmation first.

mod categories;
mod dashboard;
mod error;
mod forms;
mod guard;
mod menu_items;
mod prompt;
mod settings;

pub use categories::CategoryAdmin;
pub use dashboard::DashboardStats;
pub use error::AdminError;
pub use forms::{validate_settings, CategoryForm, MenuItemForm};
pub use guard::{SaveGuard, SaveTicket};
pub use menu_items::{category_name, CategoryFilter, MenuItemAdmin};
pub use prompt::{messages, AutoConfirm, Confirm, LogNotifier, Notifier, RecordingNotifier};
pub use settings::SettingsAdmin;

use std::sync::Arc;

use tracing::{error, info};

use crate::auth::{AdminUser, AuthSession};
use crate::clients::{CategoryClient, MenuItemClient, SettingsClient, StatsClient};
use crate::image_host::{ImageFile, ImageHost};
use crate::store::StoreError;

/// What every admin screen shares: the session, the image host and the
/// two ways of talking to the admin.
#[derive(Clone)]
pub struct AdminContext {
    pub auth: AuthSession,
    pub images: Arc<dyn ImageHost>,
    pub notifier: Arc<dyn Notifier>,
    pub confirm: Arc<dyn Confirm>,
}

impl AdminContext {
    pub fn new(
        auth: AuthSession,
        images: Arc<dyn ImageHost>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            auth,
            images,
            notifier,
            confirm,
        }
    }

    pub fn require_admin(&self) -> Result<AdminUser, AdminError> {
        self.auth.require_user().map_err(|_| AdminError::Unauthenticated)
    }

    /// Uploads `file` and returns its URL, or an empty string after alerting.
    pub async fn upload_or_empty(&self, file: ImageFile) -> String {
        match self.images.upload(file).await {
            Ok(url) => url,
            Err(e) => {
                error!(error = %e, "Error uploading image");
                self.notifier.notify(messages::UPLOAD_FAILED);
                String::new()
            }
        }
    }

    /// Logs a failed write and alerts the admin. Local state is left as is.
    pub fn report_write_failure(&self, action: &str, err: StoreError) -> AdminError {
        error!(error = %err, action, "Remote write failed");
        self.notifier.notify(messages::SAVE_FAILED);
        AdminError::Store(err)
    }

    fn confirm_delete(&self, message: &str) -> bool {
        let confirmed = self.confirm.confirm(message);
        if !confirmed {
            info!("Delete cancelled");
        }
        confirmed
    }
}

impl std::fmt::Debug for AdminContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminContext").field("auth", &self.auth).finish_non_exhaustive()
    }
}

/// All admin screens over one store.
#[derive(Debug, Clone)]
pub struct AdminPanel {
    pub categories: CategoryAdmin,
    pub menu_items: MenuItemAdmin,
    pub settings: SettingsAdmin,
    stats: StatsClient,
    ctx: AdminContext,
}

impl AdminPanel {
    pub fn new(
        categories: CategoryClient,
        menu_items: MenuItemClient,
        settings: SettingsClient,
        stats: StatsClient,
        ctx: AdminContext,
    ) -> Self {
        Self {
            categories: CategoryAdmin::new(categories.clone(), ctx.clone()),
            menu_items: MenuItemAdmin::new(menu_items, categories, ctx.clone()),
            settings: SettingsAdmin::new(settings, ctx.clone()),
            stats,
            ctx,
        }
    }

    pub fn context(&self) -> &AdminContext {
        &self.ctx
    }

    /// Counters for the dashboard landing page.
    ///
    /// Each call reads the store afresh; callers re-read after a change.
    pub async fn dashboard(&self) -> Result<DashboardStats, AdminError> {
        self.ctx.require_admin()?;
        let items = self.menu_items.list_all().await?;
        let categories = self.categories.list().await?;
        let stats = self.stats.get_stats().await?;
        Ok(DashboardStats::collect(&items, &categories, stats))
    }
}
