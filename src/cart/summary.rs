use serde::Serialize;

/// Totals shown at the bottom of the saved-items sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub subtotal: f64,
    pub service_amount: f64,
    pub total: f64,
}

impl CartSummary {
    /// `service_percent` of `subtotal` added on top; a non-finite or negative percentage counts as 0.
    pub fn new(subtotal: f64, service_percent: f64) -> Self {
        let percent = if service_percent.is_finite() && service_percent > 0.0 {
            service_percent
        } else {
            0.0
        };
        let service_amount = subtotal * percent / 100.0;
        Self {
            subtotal,
            service_amount,
            total: subtotal + service_amount,
        }
    }
}

/// Renders an amount in whole currency units, e.g. `33₪`.
pub fn format_amount(value: f64, currency: &str) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.0}{}", value, currency)
}
