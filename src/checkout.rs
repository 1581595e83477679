use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;

use crate::booking::{BookingDraft, Confirmation};
use crate::error::RentalError;
use crate::route::Route;

pub const BOOKING_ID_PREFIX: &str = "BK-";
pub const BOOKING_ID_LEN: usize = 9;
pub const SIMULATED_DELAY: Duration = Duration::from_millis(2500);

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingId(String);

impl BookingId {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let token: String = (0..BOOKING_ID_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{BOOKING_ID_PREFIX}{token}"))
    }

    /// True for `BK-` followed by exactly nine of `[A-Z0-9]`.
    pub fn is_well_formed(id: &str) -> bool {
        id.strip_prefix(BOOKING_ID_PREFIX).is_some_and(|token| {
            token.len() == BOOKING_ID_LEN
                && token
                    .bytes()
                    .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
}

impl ContactDetails {
    /// Presence only; no email or phone format checks.
    pub fn validate(&self) -> Result<(), RentalError> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("email", &self.email)?;
        require("phone", &self.phone)?;
        require("address", &self.address)?;
        require("city", &self.city)?;
        require("country", &self.country)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardDetails {
    pub card_number: String,
    pub card_name: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
}

impl CardDetails {
    /// Normalizes raw input the way the payment form does while typing.
    pub fn from_input(
        card_number: &str,
        card_name: &str,
        expiry_month: &str,
        expiry_year: &str,
        cvv: &str,
    ) -> Self {
        Self {
            card_number: format_card_number(card_number),
            card_name: card_name.to_uppercase(),
            expiry_month: digits_only(expiry_month, 2),
            expiry_year: digits_only(expiry_year, 2),
            cvv: digits_only(cvv, 4),
        }
    }

    pub fn validate(&self) -> Result<(), RentalError> {
        require("card_number", &self.card_number)?;
        require("card_name", &self.card_name)?;
        require("expiry_month", &self.expiry_month)?;
        require("expiry_year", &self.expiry_year)?;
        require("cvv", &self.cvv)
    }

    pub fn last4(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

fn require(field: &'static str, value: &str) -> Result<(), RentalError> {
    if value.trim().is_empty() {
        return Err(RentalError::MissingField(field));
    }
    Ok(())
}

fn digits_only(value: &str, max: usize) -> String {
    value.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Groups card digits by four: `"4242424242424242"` becomes `"4242 4242 4242 4242"`.
///
/// Fewer than four digits are returned untouched; anything past sixteen is dropped.
pub fn format_card_number(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).take(16).collect();
    if digits.len() < 4 {
        return value.to_string();
    }
    digits
        .as_bytes()
        .chunks(4)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Authorizes a booking and hands back its identifier.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn authorize(
        &self,
        draft: &BookingDraft,
        card: &CardDetails,
    ) -> Result<BookingId, RentalError>;
}

/// Stand-in gateway: waits, then approves every payment.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    pub delay: Duration,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self {
            delay: SIMULATED_DELAY,
        }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn authorize(
        &self,
        draft: &BookingDraft,
        card: &CardDetails,
    ) -> Result<BookingId, RentalError> {
        tracing::info!(
            car = %draft.car_name,
            total = draft.total,
            card = %card.last4(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating payment"
        );
        tokio::time::sleep(self.delay).await;
        let id = BookingId::generate(&mut rand::thread_rng());
        tracing::info!(booking_id = %id, "payment approved");
        Ok(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Details,
    Payment,
    Confirmed(Confirmation),
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Payment => "payment",
            Self::Confirmed(_) => "redirected-to-confirmation",
        }
    }
}

/// Two-step checkout: contact details, then payment, then the confirmation redirect.
#[derive(Debug, Clone)]
pub struct Checkout {
    draft: BookingDraft,
    step: Step,
    contact: ContactDetails,
}

impl Checkout {
    pub fn new(draft: BookingDraft) -> Self {
        Self {
            draft,
            step: Step::Details,
            contact: ContactDetails::default(),
        }
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// Stores the contact details and moves on to payment when every field is filled.
    ///
    /// The entered values are kept even when validation fails.
    pub fn submit_details(&mut self, contact: ContactDetails) -> Result<(), RentalError> {
        if self.step != Step::Details {
            return Err(self.wrong_step("details"));
        }
        self.contact = contact;
        self.contact.validate()?;
        self.step = Step::Payment;
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), RentalError> {
        if self.step != Step::Payment {
            return Err(self.wrong_step("payment"));
        }
        self.step = Step::Details;
        Ok(())
    }

    pub async fn pay(
        &mut self,
        gateway: &dyn PaymentGateway,
        card: CardDetails,
    ) -> Result<Route, RentalError> {
        if self.step != Step::Payment {
            return Err(self.wrong_step("payment"));
        }
        card.validate()?;

        let booking_id = gateway.authorize(&self.draft, &card).await?;
        let confirmation = Confirmation::new(booking_id.as_str(), &self.draft);
        self.step = Step::Confirmed(confirmation.clone());
        Ok(Route::PaymentSuccess(confirmation))
    }

    fn wrong_step(&self, expected: &str) -> RentalError {
        RentalError::Validation(format!(
            "checkout is at the {} step, expected {expected}",
            self.step.name()
        ))
    }
}
