use tracing::{info, instrument};

use super::error::AdminError;
use super::forms::validate_settings;
use super::guard::SaveGuard;
use super::prompt::messages;
use super::AdminContext;
use crate::clients::SettingsClient;
use crate::domain::SiteSettings;
use crate::image_host::ImageFile;

/// The settings screen.
#[derive(Debug, Clone)]
pub struct SettingsAdmin {
    client: SettingsClient,
    ctx: AdminContext,
    guard: SaveGuard,
}

impl SettingsAdmin {
    pub fn new(client: SettingsClient, ctx: AdminContext) -> Self {
        Self {
            client,
            ctx,
            guard: SaveGuard::new(),
        }
    }

    /// Stored settings over the defaults; the defaults alone when none are stored.
    pub async fn load_form(&self) -> Result<SiteSettings, AdminError> {
        self.ctx.require_admin()?;
        Ok(self.client.get_settings().await?.unwrap_or_default())
    }

    pub async fn upload_logo(&self, settings: &mut SiteSettings, file: ImageFile) -> Result<(), AdminError> {
        self.ctx.require_admin()?;
        let _saving = self.guard.try_begin()?;
        settings.logo = self.ctx.upload_or_empty(file).await;
        Ok(())
    }

    pub async fn upload_hero(&self, settings: &mut SiteSettings, file: ImageFile) -> Result<(), AdminError> {
        self.ctx.require_admin()?;
        let _saving = self.guard.try_begin()?;
        settings.hero_image = self.ctx.upload_or_empty(file).await;
        Ok(())
    }

    /// Merges every settings field into the stored record and announces the outcome.
    #[instrument(skip(self, settings))]
    pub async fn save(&self, settings: &SiteSettings) -> Result<(), AdminError> {
        self.ctx.require_admin()?;
        validate_settings(settings)?;
        let _saving = self.guard.try_begin()?;

        self.client
            .save_settings(settings)
            .await
            .map_err(|e| self.ctx.report_write_failure("save settings", e))?;
        info!("Settings saved");
        self.ctx.notifier.notify(messages::SETTINGS_SAVED);
        Ok(())
    }

    pub fn is_saving(&self) -> bool {
        self.guard.is_saving()
    }
}
