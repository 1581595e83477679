use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub car_type: String,
    pub category: String,
    pub fuel: String,
    pub transmission: String,
    #[serde(default)]
    pub image: Option<String>,
    pub passengers: u32,
    pub bags: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sipp: Option<String>,
}

impl Car {
    pub fn is_electric(&self) -> bool {
        self.fuel.to_lowercase().contains("electric")
    }

    pub fn is_automatic(&self) -> bool {
        self.transmission == "Automatic"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// One listing: a car offered by an agency at a daily price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarResult {
    pub car: Car,
    pub agency: Agency,
    pub provider: Provider,
    pub price: f64,
    pub pickup_location: String,
    #[serde(default)]
    pub fuel_policy: Option<String>,
    pub free_cancellation: bool,
    pub unlimited_mileage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// A page of listings. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub page: u32,
    pub limit: u32,
    pub count: u64,
    pub total_pages: u32,
    pub results: Vec<CarResult>,
}

impl ApiResponse {
    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.results.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Selectable filter values, fetched once per search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub car_types: Vec<String>,
    pub fuel_types: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub agencies: Vec<Agency>,
    pub price_range: PriceRange,
}
