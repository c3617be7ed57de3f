//! Editable copies of records. Every field is explicit, so a submitted
//! payload never leaves a field undefined at the store.

use super::error::AdminError;
use crate::domain::{Category, CategoryPayload, MenuItem, MenuItemPayload, PriceOption, SiteSettings};

fn require(value: &str, field: &str) -> Result<(), AdminError> {
    if value.trim().is_empty() {
        return Err(AdminError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryForm {
    pub name_ar: String,
    pub name_en: String,
    pub image: String,
    pub is_active: bool,
    pub order: i64,
}

impl CategoryForm {
    /// Blank, active category form at position `order`.
    pub fn new(order: i64) -> Self {
        Self {
            name_ar: String::new(),
            name_en: String::new(),
            image: String::new(),
            is_active: true,
            order,
        }
    }

    pub fn from_category(category: &Category) -> Self {
        Self {
            name_ar: category.name_ar.clone(),
            name_en: category.name_en.clone(),
            image: category.image.clone().unwrap_or_default(),
            is_active: category.is_active,
            order: category.order,
        }
    }

    pub fn validate(&self) -> Result<(), AdminError> {
        require(&self.name_ar, "nameAr")?;
        require(&self.name_en, "nameEn")
    }

    pub fn into_payload(self) -> CategoryPayload {
        CategoryPayload {
            name_ar: self.name_ar.trim().to_string(),
            name_en: self.name_en.trim().to_string(),
            image: self.image,
            is_active: self.is_active,
            order: self.order,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemForm {
    pub name_ar: String,
    pub name_en: String,
    pub description: String,
    pub image: String,
    pub category_id: String,
    pub is_available: bool,
    pub prices: Vec<PriceOption>,
    pub order: i64,
}

impl MenuItemForm {
    /// Blank form with one empty price row.
    pub fn new(category_id: impl Into<String>, order: i64) -> Self {
        Self {
            name_ar: String::new(),
            name_en: String::new(),
            description: String::new(),
            image: String::new(),
            category_id: category_id.into(),
            is_available: true,
            prices: vec![PriceOption::default()],
            order,
        }
    }

    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            name_ar: item.name_ar.clone(),
            name_en: item.name_en.clone(),
            description: item.description.clone().unwrap_or_default(),
            image: item.image.clone().unwrap_or_default(),
            category_id: item.category_id.clone(),
            is_available: item.is_available,
            prices: item.prices.clone(),
            order: item.order,
        }
    }

    pub fn add_price_option(&mut self) {
        self.prices.push(PriceOption::default());
    }

    pub fn remove_price_option(&mut self, index: usize) {
        if index < self.prices.len() {
            self.prices.remove(index);
        }
    }

    pub fn set_price_label(&mut self, index: usize, label: impl Into<String>) {
        if let Some(option) = self.prices.get_mut(index) {
            option.label = label.into();
        }
    }

    pub fn set_price(&mut self, index: usize, price: f64) {
        if let Some(option) = self.prices.get_mut(index) {
            option.price = price;
        }
    }

    pub fn validate(&self) -> Result<(), AdminError> {
        require(&self.name_ar, "nameAr")?;
        require(&self.name_en, "nameEn")?;
        require(&self.category_id, "categoryId")?;
        if self.prices.is_empty() {
            return Err(AdminError::Validation("at least one price is required".to_string()));
        }
        for (index, option) in self.prices.iter().enumerate() {
            require(&option.label, &format!("prices[{index}].label"))?;
            if !option.price.is_finite() || option.price < 0.0 {
                return Err(AdminError::Validation(format!("prices[{index}].price must be a non-negative number")));
            }
        }
        Ok(())
    }

    pub fn into_payload(self) -> MenuItemPayload {
        MenuItemPayload {
            name_ar: self.name_ar.trim().to_string(),
            name_en: self.name_en.trim().to_string(),
            description: self.description.trim().to_string(),
            image: self.image,
            category_id: self.category_id,
            is_available: self.is_available,
            prices: self
                .prices
                .into_iter()
                .map(|option| PriceOption::new(option.label.trim(), option.price))
                .collect(),
            order: self.order,
        }
    }
}

/// Settings have no required fields; only the service charge is checked.
pub fn validate_settings(settings: &SiteSettings) -> Result<(), AdminError> {
    if !settings.service_charge.is_finite() || settings.service_charge < 0.0 {
        return Err(AdminError::Validation("serviceCharge must be a non-negative number".to_string()));
    }
    Ok(())
}
