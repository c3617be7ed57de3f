use serde_json::{json, Map};
use tracing::{debug, instrument};

use crate::domain::{Category, CategoryPayload};
use crate::store::{StoreClient, StoreError};

/// Client for `categories/{id}`.
#[derive(Clone, Debug)]
pub struct CategoryClient {
    store: StoreClient,
}

impl_collection_client!(CategoryClient, Category, CategoryPayload, category, categories);

impl CategoryClient {
    /// Writes only the `isActive` flag.
    #[instrument(skip(self))]
    pub async fn set_category_active(&self, id: &str, is_active: bool) -> Result<(), StoreError> {
        debug!("Sending request");
        let mut fields = Map::new();
        fields.insert("isActive".to_string(), json!(is_active));
        self.store.update(&Self::category_path(id), fields).await
    }
}
