use chrono::NaiveDate;
use occupancy::Booking;
use serde::{Deserialize, Serialize};

/// Date format used by the reservation endpoints
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Error raised while talking to the Smoobu API
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Rate limited by the API (HTTP 429)
    #[error("API rate limit exceeded")]
    RateLimited,

    /// API key rejected (HTTP 401/403)
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Any other unsuccessful HTTP status
    #[error("API error: {0}")]
    Api(String),

    /// The request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// The response did not match the expected shape
    #[error("Data format error: {0}")]
    DataFormat(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::DataFormat(e.to_string())
    }
}

/// Account returned by the `me` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserInfo {
    /// Smoobu user id
    pub id: u64,
    /// First name of the account holder
    #[serde(rename = "firstName")]
    pub first_name: String,
    /// Last name of the account holder
    #[serde(rename = "lastName")]
    pub last_name: String,
    /// Account email address
    pub email: String,
}

/// Rented unit referenced by a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Apartment {
    /// Apartment id
    pub id: u64,
    /// Apartment display name
    pub name: String,
}

/// Booking channel (Airbnb, direct, ...) of a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Channel {
    /// Channel id
    pub id: u64,
    /// Channel display name
    pub name: String,
}

/// A reservation as delivered by the API.
///
/// Only `id` is mandatory on the wire; the remaining fields are checked when the
/// record is turned into a [`Booking`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRecord {
    /// Reservation id
    pub id: u64,
    /// Channel reference
    #[serde(rename = "reference-id", default)]
    pub reference_id: Option<String>,
    /// Guest display name
    #[serde(rename = "guest-name", default)]
    pub guest_name: Option<String>,
    /// Guest email address
    #[serde(default)]
    pub email: Option<String>,
    /// Arrival date (`YYYY-MM-DD`)
    #[serde(default)]
    pub arrival: Option<String>,
    /// Departure date (`YYYY-MM-DD`)
    #[serde(default)]
    pub departure: Option<String>,
    /// Total price of the stay
    #[serde(default)]
    pub price: Option<f64>,
    /// Booked apartment
    #[serde(default)]
    pub apartment: Option<Apartment>,
    /// Booking channel
    #[serde(default)]
    pub channel: Option<Channel>,
}

/// One page of the `reservations` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationsPage {
    /// Total number of reservations across all pages
    pub total_items: u32,
    /// Number of pages available
    pub page_count: u32,
    /// Reservations on this page
    pub bookings: Vec<ReservationRecord>,
}

/// All reservations of a date window, collected from every page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reservations {
    /// Total number of reservations reported by the API
    pub total_items: u32,
    /// Every reservation record
    pub bookings: Vec<ReservationRecord>,
}

/// Reason a reservation record cannot become a [`Booking`]
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum InvalidBooking {
    /// A required field is absent or null
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A date does not follow `YYYY-MM-DD`
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Departure lies before arrival
    #[error("departure {departure} is before arrival {arrival}")]
    InvalidDateRange {
        /// Parsed arrival
        arrival: NaiveDate,
        /// Parsed departure
        departure: NaiveDate,
    },
}

impl ReservationRecord {
    /// Name of the booked unit, if the record carries one
    pub fn unit_name(&self) -> Option<&str> {
        self.apartment.as_ref().map(|apartment| apartment.name.as_str())
    }

    /// Validate the record and turn it into a [`Booking`]
    pub fn to_booking(&self) -> Result<Booking, InvalidBooking> {
        let unit_name = self
            .unit_name()
            .ok_or(InvalidBooking::MissingField("apartment"))?;
        let arrival = self
            .arrival
            .as_deref()
            .ok_or(InvalidBooking::MissingField("arrival"))?;
        let departure = self
            .departure
            .as_deref()
            .ok_or(InvalidBooking::MissingField("departure"))?;
        let guest_email = self
            .email
            .as_ref()
            .ok_or(InvalidBooking::MissingField("email"))?;
        let guest_name = self
            .guest_name
            .as_ref()
            .ok_or(InvalidBooking::MissingField("guest-name"))?;
        let price = self.price.ok_or(InvalidBooking::MissingField("price"))?;

        let arrival = parse_api_date(arrival)?;
        let departure = parse_api_date(departure)?;

        if departure < arrival {
            return Err(InvalidBooking::InvalidDateRange { arrival, departure });
        }

        Ok(Booking {
            unit_name: unit_name.to_string(),
            arrival,
            departure,
            guest_email: guest_email.clone(),
            guest_name: guest_name.clone(),
            price,
        })
    }
}

fn parse_api_date(value: &str) -> Result<NaiveDate, InvalidBooking> {
    NaiveDate::parse_from_str(value, API_DATE_FORMAT)
        .map_err(|_| InvalidBooking::InvalidDate(value.to_string()))
}
