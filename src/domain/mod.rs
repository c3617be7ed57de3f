pub mod category;
pub mod menu_item;
pub mod record;
pub mod saved_item;
pub mod settings;

pub use category::*;
pub use menu_item::*;
pub use record::*;
pub use saved_item::*;
pub use settings::*;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_attaches_ids_and_sorts_by_order() {
        let snapshot = json!({
            "-a": { "nameAr": "مشاوي", "nameEn": "Grill", "order": 2, "isActive": true },
            "-b": { "nameAr": "سلطات", "nameEn": "Salads", "order": 1, "isActive": false },
            "-c": { "nameAr": "مقبلات", "nameEn": "Starters", "order": 0, "isActive": true },
        });

        let categories: Vec<Category> = normalize_collection(&snapshot);

        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["-c", "-b", "-a"]);
        assert_eq!(categories[0].name_en, "Starters");
    }

    #[test]
    fn normalize_keeps_entry_order_for_equal_order_values() {
        let snapshot = json!({
            "-a1": { "nameAr": "أ", "order": 0 },
            "-a2": { "nameAr": "ب", "order": 0 },
            "-a3": { "nameAr": "ج", "order": -1 },
        });

        let categories: Vec<Category> = normalize_collection(&snapshot);

        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["-a3", "-a1", "-a2"]);
    }

    #[test]
    fn normalize_treats_missing_data_as_empty_and_skips_bad_records() {
        assert!(normalize_collection::<MenuItem>(&serde_json::Value::Null).is_empty());

        let snapshot = json!({
            "-ok": { "nameAr": "شاورما", "categoryId": "-c", "prices": [{ "label": "S", "price": 12 }] },
            "-bad": { "nameAr": 42 },
        });
        let items: Vec<MenuItem> = normalize_collection(&snapshot);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "-ok");
        assert_eq!(items[0].prices[0].price, 12.0);
        assert!(!items[0].is_available);
    }

    #[test]
    fn null_prices_decode_as_empty_values() {
        let snapshot = json!({
            "-a": { "nameAr": "فلافل", "prices": null },
            "-b": { "nameAr": "حمص", "prices": [{ "label": null, "price": null }] },
        });
        let items: Vec<MenuItem> = normalize_collection(&snapshot);

        assert_eq!(items.len(), 2);
        assert!(items[0].prices.is_empty());
        assert_eq!(items[1].prices, vec![PriceOption::default()]);
    }

    #[test]
    fn partial_settings_fall_back_to_defaults() {
        let settings: SiteSettings = serde_json::from_value(json!({ "phone": "0599000000" })).unwrap();

        assert_eq!(settings.phone, "0599000000");
        assert_eq!(settings.currency, "₪");
        assert_eq!(settings.service_charge, 10.0);
    }

    #[test]
    fn effective_price_ignores_invalid_numbers() {
        assert_eq!(PriceOption::new("S", f64::NAN).effective_price(), 0.0);
        assert_eq!(PriceOption::new("S", -3.0).effective_price(), 0.0);
        assert_eq!(PriceOption::new("S", 7.5).effective_price(), 7.5);
    }
}
