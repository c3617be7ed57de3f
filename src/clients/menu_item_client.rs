use serde_json::{json, Map};
use tracing::{debug, instrument};

use crate::domain::{MenuItem, MenuItemPayload};
use crate::store::{StoreClient, StoreError};

/// Client for `menuItems/{id}`.
#[derive(Clone, Debug)]
pub struct MenuItemClient {
    store: StoreClient,
}

impl_collection_client!(MenuItemClient, MenuItem, MenuItemPayload, menu_item, menu_items);

impl MenuItemClient {
    /// Writes only the `isAvailable` flag.
    #[instrument(skip(self))]
    pub async fn set_menu_item_available(&self, id: &str, is_available: bool) -> Result<(), StoreError> {
        debug!("Sending request");
        let mut fields = Map::new();
        fields.insert("isAvailable".to_string(), json!(is_available));
        self.store.update(&Self::menu_item_path(id), fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceOption;
    use crate::mock_framework::{create_mock_store, expect_get, expect_remove, expect_update};
    use serde_json::json;

    #[tokio::test]
    async fn list_normalizes_the_snapshot() {
        let (store, mut receiver) = create_mock_store(4);
        let client = MenuItemClient::new(store);

        let task = tokio::spawn(async move { client.list_menu_items().await });

        let (path, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(path.to_string(), "/menuItems");
        responder
            .send(Ok(json!({
                "-b": { "nameAr": "كبة", "order": 1, "isAvailable": true },
                "-a": { "nameAr": "فتوش", "order": 0, "isAvailable": false },
            })))
            .unwrap();

        let items = task.await.unwrap().unwrap();
        assert_eq!(items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["-a", "-b"]);
    }

    #[tokio::test]
    async fn update_merges_every_payload_field() {
        let (store, mut receiver) = create_mock_store(4);
        let client = MenuItemClient::new(store);

        let task = tokio::spawn(async move {
            let payload = MenuItemPayload {
                name_ar: "منسف".to_string(),
                name_en: "Mansaf".to_string(),
                description: String::new(),
                image: String::new(),
                category_id: "-c".to_string(),
                is_available: true,
                prices: vec![PriceOption::new("Large", 60.0)],
                order: 4,
            };
            client.update_menu_item("-m", &payload).await
        });

        let (path, fields, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(path.to_string(), "/menuItems/-m");
        assert_eq!(fields.len(), 8);
        assert_eq!(fields["prices"], json!([{ "label": "Large", "price": 60.0 }]));
        responder.send(Ok(())).unwrap();
        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn delete_removes_the_record_path() {
        let (store, mut receiver) = create_mock_store(4);
        let client = MenuItemClient::new(store);

        let task = tokio::spawn(async move { client.delete_menu_item("-gone").await });

        let (path, responder) = expect_remove(&mut receiver).await.expect("Expected Remove request");
        assert_eq!(path.to_string(), "/menuItems/-gone");
        responder.send(Ok(())).unwrap();
        assert!(task.await.unwrap().is_ok());
    }
}
