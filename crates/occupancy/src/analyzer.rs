use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::calendar::OccupancyCalendar;
use crate::types::{Booking, DateRange, Event, EventKind};

/// Multiplier applied to the daily price for gap offers (43% off)
pub const OFFER_DISCOUNT_FACTOR: f64 = 0.57;

/// How many days next to an arrival or departure are inspected
pub const FREE_DAYS_LOOKAHEAD: i64 = 2;

/// Find arrivals and departures inside `range` and price a gap offer for each.
///
/// Interior days of a stay are skipped even when they fall inside the range.
/// The result is ordered by date.
pub fn analyze_bookings(bookings: &[Booking], range: &DateRange) -> Vec<Event> {
    let calendar = OccupancyCalendar::from_bookings(bookings);

    let events: Vec<Event> = range
        .days()
        .filter_map(|day| {
            let occupied = calendar.get(day)?;
            let kind = EventKind::from_role(occupied.role)?;

            Some(Event {
                date: day,
                kind,
                guest_name: occupied.guest_name.clone(),
                guest_email: occupied.guest_email.clone(),
                free_days: count_free_days(&calendar, day, kind),
                price: occupied.price_per_day,
                offer_price: offer_price(occupied.price_per_day),
            })
        })
        .collect();

    debug!(
        "Found {} events between {} and {}",
        events.len(),
        range.start,
        range.end
    );

    events
}

/// Count free days directly before an arrival or directly after a departure.
///
/// Only the two neighbouring days are inspected, so the result is at most 2.
pub fn count_free_days(calendar: &OccupancyCalendar, date: NaiveDate, kind: EventKind) -> u8 {
    let step = match kind {
        EventKind::Arrival => -1,
        EventKind::Departure => 1,
    };

    (1..=FREE_DAYS_LOOKAHEAD)
        .map(|distance| date + Duration::days(step * distance))
        .filter(|day| calendar.is_free(*day))
        .count() as u8
}

/// Discounted daily price, rounded to cents
pub fn offer_price(price_per_day: f64) -> f64 {
    round_to_cents(price_per_day * OFFER_DISCOUNT_FACTOR)
}

/// Round the exact binary value to two decimals, ties to even
fn round_to_cents(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(arrival: NaiveDate, departure: NaiveDate, guest: &str, price: f64) -> Booking {
        Booking {
            unit_name: "Penthouse".to_string(),
            arrival,
            departure,
            guest_email: format!("{}@example.com", guest.to_lowercase()),
            guest_name: guest.to_string(),
            price,
        }
    }

    #[test]
    fn test_offer_price_rounding() {
        assert_eq!(offer_price(100.0), 57.0);
        assert_eq!(offer_price(33.333), 19.0);
        assert_eq!(offer_price(150.0), 85.5);
        assert_eq!(offer_price(0.0), 0.0);
    }

    #[test]
    fn test_offer_price_just_below_half_cent() {
        // 27.5 * 0.57 is stored as 15.674999..., 17.5 * 0.57 as 9.974999...
        assert_eq!(offer_price(27.5), 15.67);
        assert_eq!(offer_price(17.5), 9.97);
    }

    #[test]
    fn test_count_free_days_looks_only_two_days_out() {
        let calendar = OccupancyCalendar::from_bookings(&[booking(
            date(2024, 6, 10),
            date(2024, 6, 12),
            "Cara",
            300.0,
        )]);

        assert_eq!(count_free_days(&calendar, date(2024, 6, 10), EventKind::Arrival), 2);
        assert_eq!(count_free_days(&calendar, date(2024, 6, 12), EventKind::Departure), 2);
    }

    #[test]
    fn test_count_free_days_with_neighbours() {
        let calendar = OccupancyCalendar::from_bookings(&[
            booking(date(2024, 6, 1), date(2024, 6, 8), "Early", 800.0),
            booking(date(2024, 6, 10), date(2024, 6, 12), "Middle", 300.0),
            booking(date(2024, 6, 13), date(2024, 6, 20), "Late", 800.0),
        ]);

        // 9th is free, 8th is the previous departure
        assert_eq!(count_free_days(&calendar, date(2024, 6, 10), EventKind::Arrival), 1);
        // 13th and 14th are taken by the next stay
        assert_eq!(count_free_days(&calendar, date(2024, 6, 12), EventKind::Departure), 0);
    }

    #[test]
    fn test_interior_days_are_not_events() {
        let range = DateRange::new(date(2024, 7, 1), date(2024, 7, 7));
        let events = analyze_bookings(
            &[booking(date(2024, 6, 20), date(2024, 7, 20), "Long", 3100.0)],
            &range,
        );

        assert!(events.is_empty());
    }

    #[test]
    fn test_events_outside_range_are_ignored() {
        let range = DateRange::new(date(2024, 7, 1), date(2024, 7, 7));
        let events = analyze_bookings(
            &[
                booking(date(2024, 6, 25), date(2024, 7, 2), "Before", 800.0),
                booking(date(2024, 7, 6), date(2024, 7, 9), "After", 400.0),
            ],
            &range,
        );

        let summary: Vec<_> = events.iter().map(|e| (e.date, e.kind)).collect();
        assert_eq!(
            summary,
            vec![
                (date(2024, 7, 2), EventKind::Departure),
                (date(2024, 7, 6), EventKind::Arrival),
            ]
        );
        assert_eq!(events[0].price, 100.0);
        assert_eq!(events[0].offer_price, 57.0);
        assert_eq!(events[1].free_days, 2);
    }
}
