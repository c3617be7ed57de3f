use serde::{Deserialize, Serialize};

use super::menu_item::{MenuItem, PriceOption};
use super::record::null_as_default;

/// A cart line: an item, the chosen price option and how many.
///
/// Lines are identified by (item id, price label).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub item: MenuItem,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selected_price: PriceOption,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
}

impl SavedItem {
    pub fn new(item: MenuItem, selected_price: PriceOption, quantity: u32) -> Self {
        Self {
            item,
            selected_price,
            quantity,
        }
    }

    pub fn matches(&self, item_id: &str, price_label: &str) -> bool {
        self.item.id == item_id && self.selected_price.label == price_label
    }

    pub fn line_total(&self) -> f64 {
        self.selected_price.effective_price() * f64::from(self.quantity)
    }
}
