use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::RentalError;
use crate::filters::SearchFilters;
use crate::route::{Route, SearchRoute};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_RANGE_DAYS: u64 = 5;

pub fn parse_date(date: &str) -> Result<NaiveDate, RentalError> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| RentalError::InvalidDate(date.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// What the home page search bar captures before navigating to `/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSelection {
    pub pickup_location: String,
    pub dropoff_location: Option<String>,
    pub pickup_date: NaiveDate,
    pub dropoff_date: NaiveDate,
    pub price_alert: bool,
}

impl TripSelection {
    pub fn new(pickup_location: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            pickup_location: pickup_location.into(),
            dropoff_location: None,
            pickup_date: today,
            dropoff_date: add_days(today, DEFAULT_RANGE_DAYS),
            price_alert: false,
        }
    }

    pub fn validate(&self) -> Result<(), RentalError> {
        if self.pickup_location.trim().is_empty() {
            return Err(RentalError::Validation(
                "Please enter a pickup location".into(),
            ));
        }
        if self.dropoff_date < self.pickup_date {
            return Err(RentalError::Validation(format!(
                "dropoff date {} is before pickup date {}",
                format_date(self.dropoff_date),
                format_date(self.pickup_date)
            )));
        }
        Ok(())
    }

    pub fn rental_days(&self) -> i64 {
        (self.dropoff_date - self.pickup_date).num_days()
    }

    /// The search navigation event: validates and produces the `/search` route.
    pub fn to_route(&self) -> Result<Route, RentalError> {
        self.validate()?;
        let dropoff = self
            .dropoff_location
            .clone()
            .filter(|d| !d.trim().is_empty());
        Ok(Route::Search(SearchRoute {
            filters: SearchFilters {
                pickup_location: Some(self.pickup_location.clone()),
                dropoff_location: dropoff,
                ..Default::default()
            },
            pickup_date: Some(self.pickup_date),
            dropoff_date: Some(self.dropoff_date),
            price_alert: self.price_alert,
        }))
    }
}
