use serde::{Deserialize, Serialize};

use crate::error::RentalError;

pub const PAGE_LIMIT: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    Rating,
    Name,
}

impl SortBy {
    /// Empty input means "Recommended", i.e. no explicit sort.
    pub fn from_str_loose(s: &str) -> Result<Option<Self>, RentalError> {
        match s {
            "" | "recommended" => Ok(None),
            "price_asc" | "price-asc" => Ok(Some(Self::PriceAsc)),
            "price_desc" | "price-desc" => Ok(Some(Self::PriceDesc)),
            "rating" => Ok(Some(Self::Rating)),
            "name" => Ok(Some(Self::Name)),
            _ => Err(RentalError::Validation(format!(
                "invalid sort order: {s} (expected price_asc, price_desc, rating or name)"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Rating => "rating",
            Self::Name => "name",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::Rating => "Rating",
            Self::Name => "Name (A-Z)",
        }
    }
}

/// The four sidebar sections that allow several values at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSelect {
    CarType,
    Category,
    Fuel,
    Agency,
}

impl MultiSelect {
    pub fn param(&self) -> &'static str {
        match self {
            Self::CarType => "car_type",
            Self::Category => "category",
            Self::Fuel => "fuel",
            Self::Agency => "agency",
        }
    }
}

/// The active filter set of a search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub car_type: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fuel: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agency: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    pub free_cancellation: bool,
    pub unlimited_mileage: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_location: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            car_type: Vec::new(),
            category: Vec::new(),
            fuel: Vec::new(),
            agency: Vec::new(),
            min_price: None,
            max_price: None,
            free_cancellation: false,
            unlimited_mileage: false,
            sort_by: None,
            pickup_location: None,
            dropoff_location: None,
            page: 1,
            limit: PAGE_LIMIT,
        }
    }
}

/// A single sidebar, sort bar or pagination interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Toggle(MultiSelect, String),
    PriceRange { min: f64, max: f64 },
    ToggleFreeCancellation,
    ToggleUnlimitedMileage,
    Sort(Option<SortBy>),
    Locations {
        pickup: Option<String>,
        dropoff: Option<String>,
    },
    Page(u32),
    ClearAll,
}

/// A partial update: `None` leaves the field as it was.
///
/// Multi-select fields replace the whole selection; use
/// [`FilterChange::Toggle`] to flip a single value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub car_type: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub fuel: Option<Vec<String>>,
    pub agency: Option<Vec<String>>,
    pub min_price: Option<Option<f64>>,
    pub max_price: Option<Option<f64>>,
    pub free_cancellation: Option<bool>,
    pub unlimited_mileage: Option<bool>,
    pub sort_by: Option<Option<SortBy>>,
    pub pickup_location: Option<Option<String>>,
    pub dropoff_location: Option<Option<String>>,
    pub page: Option<u32>,
}

impl SearchFilters {
    pub fn selection(&self, field: MultiSelect) -> &[String] {
        match field {
            MultiSelect::CarType => &self.car_type,
            MultiSelect::Category => &self.category,
            MultiSelect::Fuel => &self.fuel,
            MultiSelect::Agency => &self.agency,
        }
    }

    fn selection_mut(&mut self, field: MultiSelect) -> &mut Vec<String> {
        match field {
            MultiSelect::CarType => &mut self.car_type,
            MultiSelect::Category => &mut self.category,
            MultiSelect::Fuel => &mut self.fuel,
            MultiSelect::Agency => &mut self.agency,
        }
    }

    /// Comma-joined selection as sent upstream, `None` when nothing is selected.
    pub fn joined(&self, field: MultiSelect) -> Option<String> {
        let values = self.selection(field);
        if values.is_empty() {
            None
        } else {
            Some(values.join(","))
        }
    }

    pub fn is_selected(&self, field: MultiSelect, value: &str) -> bool {
        self.selection(field).iter().any(|v| v == value)
    }

    fn same_ignoring_page(&self, other: &Self) -> bool {
        let mut a = self.clone();
        a.page = other.page;
        a == *other
    }

    /// Merges a partial update. Any change besides the page sends the user back to page 1.
    pub fn merge(&self, update: FilterUpdate) -> Self {
        let mut next = self.clone();

        if let Some(v) = update.car_type {
            next.car_type = dedup(v);
        }
        if let Some(v) = update.category {
            next.category = dedup(v);
        }
        if let Some(v) = update.fuel {
            next.fuel = dedup(v);
        }
        if let Some(v) = update.agency {
            next.agency = dedup(v);
        }
        if let Some(v) = update.min_price {
            next.min_price = v;
        }
        if let Some(v) = update.max_price {
            next.max_price = v;
        }
        if let Some(v) = update.free_cancellation {
            next.free_cancellation = v;
        }
        if let Some(v) = update.unlimited_mileage {
            next.unlimited_mileage = v;
        }
        if let Some(v) = update.sort_by {
            next.sort_by = v;
        }
        if let Some(v) = update.pickup_location {
            next.pickup_location = non_blank(v);
        }
        if let Some(v) = update.dropoff_location {
            next.dropoff_location = non_blank(v);
        }
        if let Some(page) = update.page {
            next.page = page;
        }
        next.limit = PAGE_LIMIT;

        if !next.same_ignoring_page(self) {
            next.page = 1;
        }
        next
    }

    pub fn apply(&self, change: FilterChange) -> Self {
        match change {
            FilterChange::Toggle(field, value) => {
                let mut next = self.clone();
                let selected = next.selection_mut(field);
                if let Some(pos) = selected.iter().position(|v| *v == value) {
                    selected.remove(pos);
                } else {
                    selected.push(value);
                }
                next.page = 1;
                next.limit = PAGE_LIMIT;
                next
            }
            FilterChange::PriceRange { min, max } => self.with_page_reset(|f| {
                f.min_price = Some(min);
                f.max_price = Some(max);
            }),
            FilterChange::ToggleFreeCancellation => {
                self.with_page_reset(|f| f.free_cancellation = !f.free_cancellation)
            }
            FilterChange::ToggleUnlimitedMileage => {
                self.with_page_reset(|f| f.unlimited_mileage = !f.unlimited_mileage)
            }
            FilterChange::Sort(sort_by) => self.with_page_reset(|f| f.sort_by = sort_by),
            FilterChange::Locations { pickup, dropoff } => self.with_page_reset(|f| {
                f.pickup_location = non_blank(pickup);
                f.dropoff_location = non_blank(dropoff);
            }),
            FilterChange::Page(page) => Self {
                page,
                limit: PAGE_LIMIT,
                ..self.clone()
            },
            FilterChange::ClearAll => Self {
                pickup_location: self.pickup_location.clone(),
                dropoff_location: self.dropoff_location.clone(),
                ..Self::default()
            },
        }
    }

    fn with_page_reset(&self, edit: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        edit(&mut next);
        next.page = 1;
        next.limit = PAGE_LIMIT;
        next
    }

    /// Reads the filter parameters of a `/search` query string.
    pub fn from_query<'a, I>(pairs: I) -> Result<Self, RentalError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filters = Self::default();
        for (key, value) in pairs {
            match key {
                "car_type" => filters.car_type = split_list(value),
                "category" => filters.category = split_list(value),
                "fuel" => filters.fuel = split_list(value),
                "agency" => filters.agency = split_list(value),
                "min_price" => filters.min_price = Some(parse_price(key, value)?),
                "max_price" => filters.max_price = Some(parse_price(key, value)?),
                "free_cancellation" => filters.free_cancellation = value == "true",
                "unlimited_mileage" => filters.unlimited_mileage = value == "true",
                "sort_by" => filters.sort_by = SortBy::from_str_loose(value)?,
                "pickup_location" => filters.pickup_location = non_blank(Some(value.to_string())),
                "dropoff_location" => {
                    filters.dropoff_location = non_blank(Some(value.to_string()))
                }
                "page" => {
                    filters.page = value
                        .parse()
                        .ok()
                        .filter(|p| *p >= 1)
                        .ok_or_else(|| RentalError::Validation(format!("invalid page: {value}")))?
                }
                _ => {}
            }
        }
        Ok(filters)
    }
}

pub fn split_list(value: &str) -> Vec<String> {
    dedup(
        value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_price(key: &str, value: &str) -> Result<f64, RentalError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| RentalError::Validation(format!("invalid {key}: {value}")))
}
