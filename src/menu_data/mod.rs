//! Live menu data: categories, menu items and settings mirrored from the
//! store, normalized and kept in display order.

mod view;

pub use view::MenuSection;

use serde_json::Value;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::clients::{CategoryClient, MenuItemClient, SettingsClient};
use crate::domain::{normalize_collection, Category, MenuItem, SiteSettings};
use crate::store::{StoreError, Subscription};

/// Everything the public menu renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSnapshot {
    pub categories: Vec<Category>,
    pub menu_items: Vec<MenuItem>,
    pub settings: Option<SiteSettings>,
    /// Cleared once the settings subscription has delivered its first value.
    pub loading: bool,
}

impl Default for MenuSnapshot {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            menu_items: Vec::new(),
            settings: None,
            loading: true,
        }
    }
}

/// Handle to the running subscription task.
pub struct MenuData {
    snapshot: watch::Receiver<MenuSnapshot>,
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl MenuData {
    /// Subscribes to the three paths and starts mirroring them.
    pub async fn start(
        categories: &CategoryClient,
        menu_items: &MenuItemClient,
        settings: &SettingsClient,
    ) -> Result<Self, StoreError> {
        let categories = categories.subscribe_categories().await?;
        let menu_items = menu_items.subscribe_menu_items().await?;
        let settings = settings.subscribe_settings().await?;

        let (tx, snapshot) = watch::channel(MenuSnapshot::default());
        let (stop, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(mirror(categories, menu_items, settings, tx, stop_rx));

        Ok(Self {
            snapshot,
            stop: Some(stop),
            handle,
        })
    }

    pub fn snapshot(&self) -> MenuSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<MenuSnapshot> {
        self.snapshot.clone()
    }

    /// Waits until the snapshot satisfies `predicate`. `None` if the task ended first.
    pub async fn wait_for(&self, predicate: impl FnMut(&MenuSnapshot) -> bool) -> Option<MenuSnapshot> {
        let mut receiver = self.snapshot.clone();
        let snapshot = receiver.wait_for(predicate).await.ok()?;
        Some((*snapshot).clone())
    }

    pub async fn wait_loaded(&self) -> Option<MenuSnapshot> {
        self.wait_for(|s| !s.loading).await
    }

    /// Drops all three subscriptions and waits for the task to finish.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Menu data task failed");
        }
    }
}

#[instrument(name = "menu_data", skip_all)]
async fn mirror(
    mut categories: Subscription,
    mut menu_items: Subscription,
    mut settings: Subscription,
    tx: watch::Sender<MenuSnapshot>,
    mut stop: oneshot::Receiver<()>,
) {
    info!("Menu data subscriptions started");

    loop {
        let event = tokio::select! {
            _ = &mut stop => break,
            Some(value) = categories.next() => MenuEvent::Categories(value),
            Some(value) = menu_items.next() => MenuEvent::MenuItems(value),
            Some(value) = settings.next() => MenuEvent::Settings(value),
            else => break,
        };
        tx.send_modify(|snapshot| snapshot.apply(event));
    }

    info!("Menu data subscriptions stopped");
}

/// One delivery from one of the three subscriptions.
#[derive(Debug, Clone)]
pub enum MenuEvent {
    Categories(Value),
    MenuItems(Value),
    Settings(Value),
}

impl MenuSnapshot {
    /// Replaces the part of the snapshot the event carries. Absent data means empty.
    pub fn apply(&mut self, event: MenuEvent) {
        match event {
            MenuEvent::Categories(value) => {
                self.categories = normalize_collection(&value);
                debug!(count = self.categories.len(), "Categories changed");
            }
            MenuEvent::MenuItems(value) => {
                self.menu_items = normalize_collection(&value);
                debug!(count = self.menu_items.len(), "Menu items changed");
            }
            MenuEvent::Settings(value) => {
                self.settings = parse_settings(value);
                self.loading = false;
                debug!(present = self.settings.is_some(), "Settings changed");
            }
        }
    }
}

fn parse_settings(value: Value) -> Option<SiteSettings> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(settings) => Some(settings),
        Err(e) => {
            warn!(error = %e, "Ignoring malformed settings");
            None
        }
    }
}
