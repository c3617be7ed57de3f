//! Typed clients over the store collections used by the menu and the admin panel.

#[macro_use]
mod macros;

mod category_client;
mod menu_item_client;
mod settings_client;

pub use category_client::CategoryClient;
pub use menu_item_client::MenuItemClient;
pub use settings_client::{SettingsClient, StatsClient};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::store::StoreError;

/// Serializes a payload into the field map of a partial update.
pub fn into_fields<T: Serialize>(payload: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(payload)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Serialization(format!(
            "expected an object payload, got {}",
            other
        ))),
    }
}
