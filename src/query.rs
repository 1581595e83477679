use crate::filters::{MultiSelect, SearchFilters};

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl SearchFilters {
    /// Query parameters for `GET /cars/`.
    ///
    /// Fields are omitted by presence: `min_price: Some(0.0)` is sent as `0`.
    /// Toggles are only sent when switched on, and blank locations are dropped.
    pub fn to_api_params(&self) -> Vec<(String, String)> {
        let page = self.page.max(1);
        let mut params = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];

        for field in [MultiSelect::CarType, MultiSelect::Category, MultiSelect::Fuel] {
            if let Some(joined) = self.joined(field) {
                params.push((field.param().to_string(), joined));
            }
        }
        if let Some(min) = self.min_price {
            params.push(("min_price".to_string(), format_number(min)));
        }
        if let Some(max) = self.max_price {
            params.push(("max_price".to_string(), format_number(max)));
        }
        if self.free_cancellation {
            params.push(("free_cancellation".to_string(), "true".to_string()));
        }
        if self.unlimited_mileage {
            params.push(("unlimited_mileage".to_string(), "true".to_string()));
        }
        if let Some(sort) = self.sort_by {
            params.push(("sort_by".to_string(), sort.as_str().to_string()));
        }
        if let Some(joined) = self.joined(MultiSelect::Agency) {
            params.push(("agency".to_string(), joined));
        }
        if let Some(ref pickup) = self.pickup_location {
            if !pickup.trim().is_empty() {
                params.push(("pickup_location".to_string(), pickup.clone()));
            }
        }
        if let Some(ref dropoff) = self.dropoff_location {
            if !dropoff.trim().is_empty() {
                params.push(("dropoff_location".to_string(), dropoff.clone()));
            }
        }

        params
    }
}
