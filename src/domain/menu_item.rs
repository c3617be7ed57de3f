use serde::{Deserialize, Serialize};

use super::record::{null_as_default, Record};

/// One purchasable variant of a menu item, e.g. a size.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceOption {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
}

impl PriceOption {
    pub fn new(label: impl Into<String>, price: f64) -> Self {
        Self {
            label: label.into(),
            price,
        }
    }

    /// Price usable in arithmetic: non-finite or negative values count as 0.
    pub fn effective_price(&self) -> f64 {
        if self.price.is_finite() && self.price > 0.0 {
            self.price
        } else {
            0.0
        }
    }
}

/// A sellable dish with one or more price options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prices: Vec<PriceOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub order: i64,
}

/// Body written to `menuItems/{id}`. Every field is explicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPayload {
    pub name_ar: String,
    pub name_en: String,
    pub description: String,
    pub image: String,
    pub category_id: String,
    pub is_available: bool,
    pub prices: Vec<PriceOption>,
    pub order: i64,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name_ar: impl Into<String>,
        category_id: impl Into<String>,
        prices: Vec<PriceOption>,
    ) -> Self {
        Self {
            id: id.into(),
            name_ar: name_ar.into(),
            category_id: category_id.into(),
            prices,
            is_available: true,
            ..Self::default()
        }
    }

    pub fn price_option(&self, label: &str) -> Option<&PriceOption> {
        self.prices.iter().find(|p| p.label == label)
    }
}

impl Record for MenuItem {
    const COLLECTION: &'static str = "menuItems";

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    fn order(&self) -> i64 {
        self.order
    }
}
