use serde::Serialize;

use crate::domain::{Category, MenuItem, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_items: usize,
    pub total_categories: usize,
    pub available_items: usize,
    pub views: u64,
}

impl DashboardStats {
    pub fn collect(items: &[MenuItem], categories: &[Category], stats: Stats) -> Self {
        Self {
            total_items: items.len(),
            total_categories: categories.len(),
            available_items: items.iter().filter(|item| item.is_available).count(),
            views: stats.views,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceOption;

    #[test]
    fn counts_available_items_separately() {
        let mut sold_out = MenuItem::new("-b", "ب", "-c", vec![PriceOption::new("x", 1.0)]);
        sold_out.is_available = false;
        let items = vec![MenuItem::new("-a", "أ", "-c", Vec::new()), sold_out];
        let categories = vec![Category::new("أ", "A", 0)];

        let stats = DashboardStats::collect(&items, &categories, Stats { views: 42 });

        assert_eq!(
            stats,
            DashboardStats {
                total_items: 2,
                total_categories: 1,
                available_items: 1,
                views: 42
            }
        );
    }
}
