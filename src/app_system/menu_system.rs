use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::error::SystemError;
use crate::admin::{AdminContext, AdminPanel, AutoConfirm, Confirm, LogNotifier, Notifier};
use crate::auth::{AuthSession, IdentityProvider, LocalIdentityProvider, RestIdentityProvider};
use crate::cart::{Cart, FileStorage};
use crate::clients::{CategoryClient, MenuItemClient, SettingsClient, StatsClient};
use crate::config::{AuthProvider, Settings};
use crate::image_host::{CloudinaryHost, ImageHost};
use crate::menu_data::MenuData;
use crate::store::{MemoryStore, StoreClient};

/// How the admin panel talks back to the person using it.
#[derive(Clone)]
pub struct AdminPrompts {
    pub notifier: Arc<dyn Notifier>,
    pub confirm: Arc<dyn Confirm>,
}

impl Default for AdminPrompts {
    fn default() -> Self {
        Self {
            notifier: Arc::new(LogNotifier),
            confirm: Arc::new(AutoConfirm(true)),
        }
    }
}

/// The running application: the store actor, the live public menu, the
/// admin session and the admin screens.
pub struct MenuSystem {
    pub store: StoreClient,
    pub categories: CategoryClient,
    pub menu_items: MenuItemClient,
    pub settings: SettingsClient,
    pub auth: AuthSession,
    pub admin: AdminPanel,
    pub menu: MenuData,
    config: Settings,
    handles: Vec<JoinHandle<()>>,
}

pub fn identity_provider(config: &Settings) -> Arc<dyn IdentityProvider> {
    let auth = &config.auth;
    match auth.provider {
        AuthProvider::Local => Arc::new(LocalIdentityProvider::new(&auth.admin_email, &auth.admin_password_hash)),
        AuthProvider::Rest => Arc::new(RestIdentityProvider::new(&auth.base_url, &auth.api_key)),
    }
}

pub fn image_host(config: &Settings) -> Arc<dyn ImageHost> {
    let host = &config.image_host;
    Arc::new(CloudinaryHost::new(&host.base_url, &host.cloud_name, &host.upload_preset))
}

impl MenuSystem {
    /// Starts everything with the providers named in `config`.
    pub async fn start(config: Settings) -> Result<Self, SystemError> {
        let provider = identity_provider(&config);
        let images = image_host(&config);
        Self::start_with(config, provider, images, AdminPrompts::default()).await
    }

    #[instrument(name = "menu_system_start", skip_all)]
    pub async fn start_with(
        config: Settings,
        provider: Arc<dyn IdentityProvider>,
        images: Arc<dyn ImageHost>,
        prompts: AdminPrompts,
    ) -> Result<Self, SystemError> {
        // 1. Store, seeded when a seed file is configured
        let (store_actor, store) = match &config.store.seed_path {
            Some(path) => {
                let seed = MemoryStore::load_seed(path).await?;
                info!(path = %path.display(), "Store seeded");
                MemoryStore::with_data(config.store.buffer_size, seed)
            }
            None => MemoryStore::new(config.store.buffer_size),
        };
        let store_handle = tokio::spawn(store_actor.run());

        // 2. Typed clients
        let categories = CategoryClient::new(store.clone());
        let menu_items = MenuItemClient::new(store.clone());
        let settings = SettingsClient::new(store.clone());
        let stats = StatsClient::new(store.clone());

        // 3. Admin session and screens
        let auth = AuthSession::new(provider);
        auth.resolve(None);
        let ctx = AdminContext::new(auth.clone(), images, prompts.notifier, prompts.confirm);
        let admin = AdminPanel::new(categories.clone(), menu_items.clone(), settings.clone(), stats, ctx);

        // 4. Public menu subscriptions
        let menu = MenuData::start(&categories, &menu_items, &settings).await?;

        info!("Menu system started");
        Ok(Self {
            store,
            categories,
            menu_items,
            settings,
            auth,
            admin,
            menu,
            config,
            handles: vec![store_handle],
        })
    }

    /// The visitor's saved items, persisted in the configured directory.
    pub fn open_cart(&self) -> Cart<FileStorage> {
        Cart::load(FileStorage::new(&self.config.cart.storage_dir))
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        self.menu.shutdown().await;
        self.store.shutdown().await?;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::TaskFailed(format!("{:?}", e)));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
