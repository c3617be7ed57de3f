use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// A record that lives as a child of a keyed collection in the store.
///
/// The child key is the record id; it is never part of the stored body and is
/// attached after the body is read back.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection path, e.g. `categories`.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Returns the record tagged with the store-assigned id.
    fn with_id(self, id: String) -> Self;

    /// Display position. Not unique, not contiguous.
    fn order(&self) -> i64;
}

/// Decodes an explicit `null` the same way as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Flattens a `{id: body}` snapshot into records sorted by ascending `order`.
///
/// The sort is stable, so records sharing an `order` keep the store's child
/// order. Absent data yields an empty list; bodies that do not decode are
/// skipped.
pub fn normalize_collection<T: Record>(snapshot: &Value) -> Vec<T> {
    let children = match snapshot {
        Value::Object(children) => children,
        Value::Null => return Vec::new(),
        other => {
            debug!(collection = T::COLLECTION, kind = ?other, "Collection snapshot is not an object");
            return Vec::new();
        }
    };

    let mut records: Vec<T> = children
        .iter()
        .filter_map(|(id, body)| match serde_json::from_value::<T>(body.clone()) {
            Ok(record) => Some(record.with_id(id.clone())),
            Err(e) => {
                warn!(collection = T::COLLECTION, id = %id, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();

    records.sort_by_key(|record| record.order());
    records
}
