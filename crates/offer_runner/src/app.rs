use chrono::{Duration, NaiveDate, NaiveDateTime};
use notification_services::{DispatchSummary, OfferDispatcher};
use occupancy::{DateRange, analyze_bookings};
use smoobu_api::{ApiError, SmoobuService, bookings_by_unit};

/// Days after today covered by the reservation fetch
pub const RESERVATION_LOOKAHEAD_DAYS: i64 = 21;

/// One reporting and offer run against the booking API
pub struct App {
    service: SmoobuService,
    dispatcher: OfferDispatcher,
}

impl App {
    /// Create a run using `service` for bookings and `dispatcher` for offers
    pub fn new(service: SmoobuService, dispatcher: OfferDispatcher) -> Self {
        Self {
            service,
            dispatcher,
        }
    }

    /// Print all reports and send the offers for the week derived from `now`.
    ///
    /// API failures end the run early but are not fatal.
    pub async fn run(&self, now: NaiveDateTime) -> Option<DispatchSummary> {
        println!("Smoobu Booking Gap Offers");
        println!("=========================");
        println!("Run started at {}\n", now.format("%Y-%m-%d %H:%M:%S"));

        match self.run_reports(now.date()).await {
            Ok(summary) => {
                log::info!(
                    "✅ Run completed: {} offer(s) sent, {} failed",
                    summary.sent,
                    summary.failed
                );
                Some(summary)
            }
            Err(e) => {
                log::error!("❌ Run aborted: {}", e);
                println!("An error occurred: {}", e);
                None
            }
        }
    }

    /// Fetch, report, analyze and dispatch for the booking window starting at `today`
    pub async fn run_reports(&self, today: NaiveDate) -> Result<DispatchSummary, ApiError> {
        let user = self.service.get_user_info().await?;
        println!("{}", reports::format_user_info(&user));

        let until = today + Duration::days(RESERVATION_LOOKAHEAD_DAYS);
        let reservations = self.service.get_reservations(today, until).await?;
        println!("{}", reports::format_reservations(&reservations));

        let units = bookings_by_unit(&reservations);
        println!("{}", reports::format_booking_list(&units));

        let target_week = DateRange::target_week(today);
        log::info!(
            "🔍 Checking {} unit(s) for gaps between {} and {}",
            units.len(),
            target_week.start,
            target_week.end
        );

        let mut summary = DispatchSummary::default();

        for (unit_name, bookings) in &units {
            let events = analyze_bookings(bookings, &target_week);
            println!(
                "{}\n",
                reports::format_unoccupied_days(unit_name, &target_week, &events)
            );

            summary += self
                .dispatcher
                .send_offers_for_unit(unit_name, &events)
                .await;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use notification_services::{EmailService, NotificationError};
    use serde_json::{Value, json};
    use smoobu_api::ApiClient;
    use std::sync::{Arc, Mutex};

    /// Serves a fixed account and a single page of reservations
    struct FakeApiClient {
        reservations: Value,
        requests: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ApiClient for FakeApiClient {
        async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
            self.requests.lock().unwrap().push(endpoint.to_string());

            if endpoint == "me" {
                return Ok(json!({
                    "id": 7,
                    "firstName": "Hanna",
                    "lastName": "Host",
                    "email": "host@example.com"
                }));
            }

            if endpoint.starts_with("reservations?") {
                return Ok(self.reservations.clone());
            }

            Err(ApiError::Api(format!("HTTP 404 Not Found - {}", endpoint)))
        }

        async fn post(&self, _endpoint: &str, _body: &Value) -> Result<Value, ApiError> {
            Err(ApiError::Api("unexpected POST".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingEmailService {
        recipients: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EmailService for RecordingEmailService {
        async fn send_email(
            &self,
            to: &str,
            _subject: &str,
            _html_body: &str,
        ) -> Result<String, NotificationError> {
            self.recipients.lock().unwrap().push(to.to_string());
            Ok("250".to_string())
        }
    }

    fn reservation(id: u64, unit: &str, guest: &str, arrival: &str, departure: &str) -> Value {
        json!({
            "id": id,
            "guest-name": guest,
            "email": format!("{}@example.com", guest.to_lowercase()),
            "arrival": arrival,
            "departure": departure,
            "price": 400.0,
            "apartment": { "id": id, "name": unit }
        })
    }

    fn app_with(reservations: Value) -> (App, Arc<FakeApiClient>, Arc<RecordingEmailService>) {
        let api_client = Arc::new(FakeApiClient {
            reservations,
            requests: Mutex::new(Vec::new()),
        });
        let email_service = Arc::new(RecordingEmailService::default());
        let app = App::new(
            SmoobuService::new(api_client.clone()),
            OfferDispatcher::new(email_service.clone()),
        );
        (app, api_client, email_service)
    }

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    #[tokio::test]
    async fn test_offers_sent_for_guests_in_target_week() {
        // Target week for 2024-01-03 is 2024-01-15..=2024-01-21
        let (app, api_client, email_service) = app_with(json!({
            "total_items": 3,
            "page_count": 1,
            "bookings": [
                reservation(1, "Seeblick", "Anna", "2024-01-16", "2024-01-18"),
                reservation(2, "Seeblick", "Bert", "2024-01-25", "2024-01-27"),
                reservation(3, "Altbau", "Carla", "2024-01-10", "2024-01-20"),
            ]
        }));

        let summary = app.run_reports(wednesday()).await.unwrap();

        assert_eq!(summary, DispatchSummary { sent: 2, failed: 0 });

        let recipients = email_service.recipients.lock().unwrap();
        assert_eq!(
            *recipients,
            vec!["carla@example.com".to_string(), "anna@example.com".to_string()]
        );

        let requests = api_client.requests.lock().unwrap();
        assert_eq!(requests[0], "me");
        assert!(requests[1].starts_with("reservations?from=2024-01-03&to=2024-01-24"));
    }

    #[tokio::test]
    async fn test_api_error_ends_run_without_panicking() {
        let (app, _, email_service) = app_with(json!({ "unexpected": true }));
        let now = wednesday().and_hms_opt(9, 30, 0).unwrap();

        assert!(app.run(now).await.is_none());
        assert!(email_service.recipients.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_account_sends_nothing() {
        let (app, _, email_service) = app_with(json!({
            "total_items": 0,
            "page_count": 1,
            "bookings": []
        }));
        let now = wednesday().and_hms_opt(9, 30, 0).unwrap();

        assert_eq!(app.run(now).await, Some(DispatchSummary::default()));
        assert!(email_service.recipients.lock().unwrap().is_empty());
    }
}
