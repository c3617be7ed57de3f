use super::MenuSnapshot;
use crate::domain::{Category, MenuItem};

/// A category heading with the dishes listed under it on the public menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection<'a> {
    pub category: &'a Category,
    pub items: Vec<&'a MenuItem>,
}

impl MenuSnapshot {
    /// Categories shown to visitors, in display order.
    pub fn active_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.is_active).collect()
    }

    /// Available items of one category, in display order.
    pub fn items_in(&self, category_id: &str) -> Vec<&MenuItem> {
        self.menu_items
            .iter()
            .filter(|item| item.category_id == category_id && item.is_available)
            .collect()
    }

    /// The tab selected when the menu first opens.
    pub fn default_category(&self) -> Option<&Category> {
        self.categories.iter().find(|c| c.is_active)
    }

    pub fn is_empty_menu(&self) -> bool {
        self.default_category().is_none()
    }

    /// Active categories with their available items. Categories with nothing
    /// to show are left out.
    pub fn sections(&self) -> Vec<MenuSection<'_>> {
        self.active_categories()
            .into_iter()
            .map(|category| MenuSection {
                category,
                items: self.items_in(&category.id),
            })
            .filter(|section| !section.items.is_empty())
            .collect()
    }

    /// Service charge percentage for the cart total; 0 without settings.
    pub fn service_charge(&self) -> f64 {
        self.settings
            .as_ref()
            .map_or(0.0, |settings| settings.effective_service_charge())
    }

    pub fn find_item(&self, item_id: &str) -> Option<&MenuItem> {
        self.menu_items.iter().find(|item| item.id == item_id)
    }
}
