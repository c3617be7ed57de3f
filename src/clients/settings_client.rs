use tracing::{debug, instrument};

use super::into_fields;
use crate::domain::{SiteSettings, Stats, SETTINGS_PATH, STATS_PATH};
use crate::store::{StoreClient, StoreError, Subscription};

/// Client for the `settings` singleton.
#[derive(Clone, Debug)]
pub struct SettingsClient {
    store: StoreClient,
}

impl SettingsClient {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// `None` when no settings were ever saved.
    #[instrument(skip(self))]
    pub async fn get_settings(&self) -> Result<Option<SiteSettings>, StoreError> {
        debug!("Sending request");
        let snapshot = self.store.get(SETTINGS_PATH).await?;
        if snapshot.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(snapshot)?))
    }

    #[instrument(skip(self))]
    pub async fn subscribe_settings(&self) -> Result<Subscription, StoreError> {
        debug!("Sending request");
        self.store.subscribe(SETTINGS_PATH).await
    }

    #[instrument(skip(self, settings))]
    pub async fn save_settings(&self, settings: &SiteSettings) -> Result<(), StoreError> {
        debug!("Sending request");
        self.store.update(SETTINGS_PATH, into_fields(settings)?).await
    }
}

/// Read-only client for the `stats` counters.
#[derive(Clone, Debug)]
pub struct StatsClient {
    store: StoreClient,
}

impl StatsClient {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get_stats(&self) -> Result<Stats, StoreError> {
        debug!("Sending request");
        let snapshot = self.store.get(STATS_PATH).await?;
        if snapshot.is_null() {
            return Ok(Stats::default());
        }
        Ok(serde_json::from_value(snapshot)?)
    }
}
