use chrono::NaiveDate;
use serde::Serialize;

use crate::error::RentalError;
use crate::model::CarResult;
use crate::selector::{add_days, format_date, parse_date};

pub const DEFAULT_RENTAL_DAYS: u32 = 5;
pub const FIXED_FEES: f64 = 0.0;

/// The unpersisted bundle describing a selected rental, carried in the
/// `/payment` query string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingDraft {
    pub car_name: String,
    pub car_type: String,
    pub agency: String,
    pub pickup: String,
    pub dropoff: String,
    pub pickup_date: NaiveDate,
    pub dropoff_date: NaiveDate,
    pub days: u32,
    pub price: f64,
    pub total: f64,
    pub image: String,
}

impl BookingDraft {
    pub fn from_result(result: &CarResult, today: NaiveDate) -> Self {
        let days = DEFAULT_RENTAL_DAYS;
        Self {
            car_name: result.car.name.clone(),
            car_type: result.car.car_type.clone(),
            agency: result.agency.name.clone(),
            pickup: result.pickup_location.clone(),
            dropoff: result.pickup_location.clone(),
            pickup_date: today,
            dropoff_date: add_days(today, u64::from(days)),
            days,
            price: result.price,
            total: result.price * f64::from(days),
            image: result.car.image.clone().unwrap_or_default(),
        }
    }

    pub fn line_item_total(&self) -> f64 {
        self.price * f64::from(self.days)
    }

    pub fn fees(&self) -> f64 {
        FIXED_FEES
    }

    pub fn grand_total(&self) -> f64 {
        self.line_item_total() + self.fees()
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("car_name", self.car_name.clone()),
            ("car_type", self.car_type.clone()),
            ("agency", self.agency.clone()),
            ("pickup", self.pickup.clone()),
            ("dropoff", self.dropoff.clone()),
            ("pickup_date", format_date(self.pickup_date)),
            ("dropoff_date", format_date(self.dropoff_date)),
            ("days", self.days.to_string()),
            ("price", amount_param(self.price)),
            ("total", amount_param(self.total)),
            ("image", self.image.clone()),
        ]
    }

    pub fn from_query<'a, I>(pairs: I) -> Result<Self, RentalError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut car_name = None;
        let mut car_type = String::new();
        let mut agency = String::new();
        let mut pickup = String::new();
        let mut dropoff = None;
        let mut pickup_date = None;
        let mut dropoff_date = None;
        let mut days = DEFAULT_RENTAL_DAYS;
        let mut price = 0.0;
        let mut total = None;
        let mut image = String::new();

        for (key, value) in pairs {
            match key {
                "car_name" => car_name = Some(value.to_string()),
                "car_type" => car_type = value.to_string(),
                "agency" => agency = value.to_string(),
                "pickup" => pickup = value.to_string(),
                "dropoff" => dropoff = Some(value.to_string()),
                "pickup_date" => pickup_date = Some(parse_date(value)?),
                "dropoff_date" => dropoff_date = Some(parse_date(value)?),
                "days" => days = parse_number(key, value)?,
                "price" => price = parse_amount(key, value)?,
                "total" => total = Some(parse_amount(key, value)?),
                "image" => image = value.to_string(),
                _ => {}
            }
        }

        let car_name = car_name
            .filter(|n| !n.trim().is_empty())
            .ok_or(RentalError::MissingField("car_name"))?;
        let pickup_date = pickup_date.ok_or(RentalError::MissingField("pickup_date"))?;
        let dropoff_date =
            dropoff_date.unwrap_or_else(|| add_days(pickup_date, u64::from(days)));

        Ok(Self {
            car_name,
            car_type,
            agency,
            dropoff: dropoff.unwrap_or_else(|| pickup.clone()),
            pickup,
            pickup_date,
            dropoff_date,
            days,
            price,
            total: total.unwrap_or(price * f64::from(days)),
            image,
        })
    }
}

/// What the `/payment/success` page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    pub booking_id: String,
    pub car_name: String,
    pub total: f64,
    pub pickup_date: String,
    pub dropoff_date: String,
}

impl Confirmation {
    pub fn new(booking_id: impl Into<String>, draft: &BookingDraft) -> Self {
        Self {
            booking_id: booking_id.into(),
            car_name: draft.car_name.clone(),
            total: draft.total,
            pickup_date: format_date(draft.pickup_date),
            dropoff_date: format_date(draft.dropoff_date),
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("booking_id", self.booking_id.clone()),
            ("car_name", self.car_name.clone()),
            ("total", amount_param(self.total)),
            ("pickup_date", self.pickup_date.clone()),
            ("dropoff_date", self.dropoff_date.clone()),
        ]
    }

    /// Missing parameters fall back to placeholders instead of failing.
    pub fn from_query<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut conf = Self {
            booking_id: "BK-UNKNOWN".to_string(),
            car_name: "Car".to_string(),
            total: 0.0,
            pickup_date: String::new(),
            dropoff_date: String::new(),
        };
        for (key, value) in pairs {
            match key {
                "booking_id" if !value.is_empty() => conf.booking_id = value.to_string(),
                "car_name" if !value.is_empty() => conf.car_name = value.to_string(),
                "total" => conf.total = value.parse().unwrap_or(0.0),
                "pickup_date" => conf.pickup_date = value.to_string(),
                "dropoff_date" => conf.dropoff_date = value.to_string(),
                _ => {}
            }
        }
        conf
    }
}

fn amount_param(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn parse_amount(key: &str, value: &str) -> Result<f64, RentalError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| RentalError::Validation(format!("invalid {key}: {value}")))
}

fn parse_number(key: &str, value: &str) -> Result<u32, RentalError> {
    value
        .parse::<u32>()
        .map_err(|_| RentalError::Validation(format!("invalid {key}: {value}")))
}
