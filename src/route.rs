use std::fmt;

use chrono::NaiveDate;
use url::Url;
use url::form_urlencoded::Serializer;

use crate::booking::{BookingDraft, Confirmation};
use crate::error::RentalError;
use crate::filters::SearchFilters;
use crate::selector::{format_date, parse_date};

const ROUTE_BASE: &str = "http://storefront.local/";

/// `/search` carries the trip selection and the active filters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRoute {
    pub filters: SearchFilters,
    pub pickup_date: Option<NaiveDate>,
    pub dropoff_date: Option<NaiveDate>,
    pub price_alert: bool,
}

/// A storefront page together with the state its query string carries.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Search(SearchRoute),
    Payment(BookingDraft),
    PaymentSuccess(Confirmation),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Search(_) => "/search",
            Self::Payment(_) => "/payment",
            Self::PaymentSuccess(_) => "/payment/success",
        }
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match self {
            Self::Home => Vec::new(),
            Self::Search(search) => {
                let mut pairs = Vec::new();
                let f = &search.filters;
                if let Some(ref pickup) = f.pickup_location {
                    pairs.push(("pickup_location".to_string(), pickup.clone()));
                }
                if let Some(ref dropoff) = f.dropoff_location {
                    pairs.push(("dropoff_location".to_string(), dropoff.clone()));
                }
                if let Some(date) = search.pickup_date {
                    pairs.push(("pickup_date".to_string(), format_date(date)));
                }
                if let Some(date) = search.dropoff_date {
                    pairs.push(("dropoff_date".to_string(), format_date(date)));
                }
                if search.price_alert {
                    pairs.push(("alert".to_string(), "true".to_string()));
                }
                // The API parameters already cover every filter; skip the
                // defaults and the locations added above.
                for (key, value) in f.to_api_params() {
                    let default_page = key == "page" && value == "1";
                    let skip = default_page
                        || key == "limit"
                        || key == "pickup_location"
                        || key == "dropoff_location";
                    if !skip {
                        pairs.push((key, value));
                    }
                }
                pairs
            }
            Self::Payment(draft) => draft
                .to_query()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            Self::PaymentSuccess(conf) => conf
                .to_query()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    /// Parses a path with an optional query string, e.g. `/search?pickup_location=Luxor+Hotel`.
    pub fn parse(input: &str) -> Result<Self, RentalError> {
        let invalid = || RentalError::InvalidRoute(input.to_string());

        let base = Url::parse(ROUTE_BASE).map_err(|_| invalid())?;
        let url = base.join(input.trim()).map_err(|_| invalid())?;

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let borrowed = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()));

        match url.path().trim_end_matches('/') {
            "" => Ok(Self::Home),
            "/search" => {
                let filters = SearchFilters::from_query(borrowed.clone())?;
                let mut pickup_date = None;
                let mut dropoff_date = None;
                let mut price_alert = false;
                for (key, value) in borrowed {
                    match key {
                        "pickup_date" => pickup_date = Some(parse_date(value)?),
                        "dropoff_date" => dropoff_date = Some(parse_date(value)?),
                        "alert" => price_alert = value == "true",
                        _ => {}
                    }
                }
                Ok(Self::Search(SearchRoute {
                    filters,
                    pickup_date,
                    dropoff_date,
                    price_alert,
                }))
            }
            "/payment" => Ok(Self::Payment(BookingDraft::from_query(borrowed)?)),
            "/payment/success" => Ok(Self::PaymentSuccess(Confirmation::from_query(borrowed))),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return write!(f, "{}", self.path());
        }
        let mut query = Serializer::new(String::new());
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
        write!(f, "{}?{}", self.path(), query.finish())
    }
}
