use serde::{Deserialize, Serialize};

/// Path of the site settings singleton.
pub const SETTINGS_PATH: &str = "settings";
/// Path of the view counters.
pub const STATS_PATH: &str = "stats";

/// Restaurant-wide settings. Stored once under [`SETTINGS_PATH`], no id.
///
/// Fields missing from a stored record fall back to [`SiteSettings::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    pub logo: String,
    pub restaurant_name_ar: String,
    pub restaurant_name_en: String,
    pub hero_image: String,
    /// Percentage applied on top of the cart subtotal.
    pub service_charge: f64,
    pub currency: String,
    pub phone: String,
    pub address: String,
    pub working_hours: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            logo: String::new(),
            restaurant_name_ar: "مطعم ومطبخ مهران".to_string(),
            restaurant_name_en: "Mehran Kitchen & Restaurant".to_string(),
            hero_image: String::new(),
            service_charge: 10.0,
            currency: "₪".to_string(),
            phone: String::new(),
            address: String::new(),
            working_hours: String::new(),
        }
    }
}

impl SiteSettings {
    /// Service charge usable in arithmetic; non-finite or negative counts as 0.
    pub fn effective_service_charge(&self) -> f64 {
        if self.service_charge.is_finite() && self.service_charge > 0.0 {
            self.service_charge
        } else {
            0.0
        }
    }
}

/// View counters maintained outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub views: u64,
}
