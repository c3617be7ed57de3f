use serde::{Deserialize, Serialize};

use super::record::Record;

/// A named grouping of menu items.
///
/// Inactive categories are hidden from the public menu but stay editable in
/// the admin panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_active: bool,
}

/// Body written to `categories/{id}`. Every field is explicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name_ar: String,
    pub name_en: String,
    pub image: String,
    pub is_active: bool,
    pub order: i64,
}

impl Category {
    pub fn new(name_ar: impl Into<String>, name_en: impl Into<String>, order: i64) -> Self {
        Self {
            id: String::new(),
            name_ar: name_ar.into(),
            name_en: name_en.into(),
            image: None,
            order,
            is_active: true,
        }
    }
}

impl Record for Category {
    const COLLECTION: &'static str = "categories";

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
