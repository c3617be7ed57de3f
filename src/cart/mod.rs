//! The visitor's saved-items list.
//!
//! Lines live in memory and are rewritten wholesale to device storage after
//! every change. Storage failures are logged and never undo the in-memory
//! change.

mod error;
mod storage;
mod summary;

pub use error::CartStorageError;
pub use storage::{CartStorage, FileStorage, MemoryStorage};
pub use summary::{format_amount, CartSummary};

use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::{MenuItem, PriceOption, SavedItem};

/// Device storage key holding the JSON array of saved items.
pub const STORAGE_KEY: &str = "mehran_saved_items";

pub struct Cart<S: CartStorage> {
    items: Vec<SavedItem>,
    storage: S,
}

impl<S: CartStorage> Cart<S> {
    /// Restores the persisted list. Unreadable or malformed data gives an empty cart.
    #[instrument(name = "cart_load", skip(storage))]
    pub fn load(storage: S) -> Self {
        let items = match storage.load(STORAGE_KEY) {
            Ok(Some(payload)) => parse_lines(&payload),
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(error = %e, "Failed to read saved items");
                Vec::new()
            }
        };
        info!(lines = items.len(), "Cart loaded");
        Self { items, storage }
    }

    /// Adds `quantity` of the (item, price) pair, merging into an existing line.
    pub fn add_item(&mut self, item: &MenuItem, selected_price: &PriceOption, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self
            .items
            .iter_mut()
            .find(|line| line.matches(&item.id, &selected_price.label))
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self
                .items
                .push(SavedItem::new(item.clone(), selected_price.clone(), quantity)),
        }
        debug!(item_id = %item.id, price_label = %selected_price.label, quantity, "Item saved");
        self.persist();
    }

    pub fn remove_item(&mut self, item_id: &str, price_label: &str) {
        self.items.retain(|line| !line.matches(item_id, price_label));
        debug!(item_id, price_label, "Item removed");
        self.persist();
    }

    /// Overwrites a line's quantity; zero or less removes the line.
    pub fn update_quantity(&mut self, item_id: &str, price_label: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(item_id, price_label);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        for line in self.items.iter_mut().filter(|line| line.matches(item_id, price_label)) {
            line.quantity = quantity;
        }
        self.persist();
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
        if let Err(e) = self.storage.clear(STORAGE_KEY) {
            error!(error = %e, "Failed to clear saved items");
        }
    }

    pub fn lines(&self) -> &[SavedItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any line holds this item, whatever the price option.
    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|line| line.item.id == item_id)
    }

    /// Whether this exact (item, price option) pair is already saved.
    pub fn is_saved(&self, item_id: &str, price_label: &str) -> bool {
        self.items.iter().any(|line| line.matches(item_id, price_label))
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(SavedItem::line_total).sum()
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn summary(&self, service_percent: f64) -> CartSummary {
        CartSummary::new(self.total_price(), service_percent)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) {
        let result = encode_lines(&self.items)
            .and_then(|payload| self.storage.save(STORAGE_KEY, &payload));
        if let Err(e) = result {
            error!(error = %e, "Failed to persist saved items");
        }
    }
}

fn encode_lines(items: &[SavedItem]) -> Result<String, CartStorageError> {
    Ok(serde_json::to_string(items)?)
}

fn parse_lines(payload: &str) -> Vec<SavedItem> {
    let entries: Vec<Value> = match serde_json::from_str(payload) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Discarding malformed saved items");
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<SavedItem>(entry) {
            Ok(line) if line.quantity > 0 => Some(line),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Skipping malformed saved item");
                None
            }
        })
        .collect()
}
