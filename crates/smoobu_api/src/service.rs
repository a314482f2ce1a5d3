use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use occupancy::Booking;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::types::{API_DATE_FORMAT, ApiError, Reservations, ReservationsPage, UserInfo};

/// Reservations requested per page
pub const RESERVATIONS_PAGE_SIZE: u32 = 100;

/// High-level operations on top of an [`ApiClient`]
pub struct SmoobuService {
    api_client: Arc<dyn ApiClient>,
}

impl SmoobuService {
    /// Create a service using the given client
    pub fn new(api_client: Arc<dyn ApiClient>) -> Self {
        Self { api_client }
    }

    /// Fetch the account behind the API key
    pub async fn get_user_info(&self) -> Result<UserInfo, ApiError> {
        let data = self.api_client.get("me").await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Fetch every reservation between `from` and `to`, following all pages
    pub async fn get_reservations(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Reservations, ApiError> {
        debug!("Fetching reservations from {} to {}", from, to);

        let mut bookings = Vec::new();
        let mut page = 1;
        let mut totals: Option<(u32, u32)> = None;

        loop {
            let endpoint = reservations_endpoint(from, to, page);
            let data: ReservationsPage = serde_json::from_value(self.api_client.get(&endpoint).await?)?;

            bookings.extend(data.bookings);

            let (total_items, page_count) = *totals.get_or_insert((data.total_items, data.page_count));
            debug!("Fetched page {} of {} ({} reservations)", page, page_count, total_items);

            if page >= page_count {
                break;
            }

            page += 1;
        }

        let total_items = totals.map(|(total_items, _)| total_items).unwrap_or_default();
        info!("Fetched {} reservations on {} page(s)", bookings.len(), page);

        Ok(Reservations {
            total_items,
            bookings,
        })
    }

    /// Fetch the reservations between `from` and `to` as validated bookings.
    ///
    /// Records missing a required field or carrying an unreadable date are skipped.
    pub async fn get_bookings(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Booking>, ApiError> {
        let reservations = self.get_reservations(from, to).await?;
        Ok(bookings_by_unit(&reservations).into_values().flatten().collect())
    }

    /// Fetch the bookings between `from` and `to` grouped by unit name
    pub async fn get_bookings_by_unit(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<BTreeMap<String, Vec<Booking>>, ApiError> {
        let reservations = self.get_reservations(from, to).await?;
        Ok(bookings_by_unit(&reservations))
    }

    /// Post a message to the host of a reservation.
    ///
    /// Internal messages are only visible to the host.
    pub async fn send_message_to_host(
        &self,
        reservation_id: u64,
        subject: &str,
        message_body: &str,
        internal: bool,
    ) -> Result<Value, ApiError> {
        let endpoint = format!("reservations/{}/messages/send-message-to-host", reservation_id);
        let body = json!({
            "subject": subject,
            "messageBody": message_body,
            "internal": internal,
        });

        self.api_client.post(&endpoint, &body).await
    }
}

/// Group valid bookings by unit name.
///
/// A unit named by a reservation keeps its entry even when none of its records
/// are complete, so it is reported with an empty list.
pub fn bookings_by_unit(reservations: &Reservations) -> BTreeMap<String, Vec<Booking>> {
    let mut units: BTreeMap<String, Vec<Booking>> = BTreeMap::new();

    for record in &reservations.bookings {
        if let Some(unit_name) = record.unit_name() {
            units.entry(unit_name.to_string()).or_default();
        }

        match record.to_booking() {
            Ok(booking) => units.entry(booking.unit_name.clone()).or_default().push(booking),
            Err(e) => warn!("Skipping reservation {}: {}", record.id, e),
        }
    }

    units
}

fn reservations_endpoint(from: NaiveDate, to: NaiveDate, page: u32) -> String {
    format!(
        "reservations?from={}&to={}&pageSize={}&page={}",
        from.format(API_DATE_FORMAT),
        to.format(API_DATE_FORMAT),
        RESERVATIONS_PAGE_SIZE,
        page
    )
}
