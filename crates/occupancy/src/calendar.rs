use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::types::{Booking, DayRole};

/// Booking details attached to one occupied calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct OccupiedDay {
    /// Role of the day within its stay
    pub role: DayRole,
    /// Guest display name
    pub guest_name: String,
    /// Guest email address
    pub guest_email: String,
    /// Average price per day of the stay
    pub price_per_day: f64,
}

/// Map of every day covered by a unit's bookings.
///
/// Bookings are applied in order; when two stays overlap the later one
/// overwrites the shared days.
#[derive(Debug, Clone, Default)]
pub struct OccupancyCalendar {
    days: HashMap<NaiveDate, OccupiedDay>,
}

impl OccupancyCalendar {
    /// Build the calendar for a unit's bookings
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        let mut days = HashMap::new();

        for booking in bookings {
            let price_per_day = booking.price_per_day();

            for offset in 0..booking.days_inclusive() {
                let day = booking.arrival + Duration::days(offset);

                // Arrival is checked first so a same-day stay counts as an arrival
                let role = if day == booking.arrival {
                    DayRole::Arrival
                } else if day == booking.departure {
                    DayRole::Departure
                } else {
                    DayRole::Occupied
                };

                days.insert(
                    day,
                    OccupiedDay {
                        role,
                        guest_name: booking.guest_name.clone(),
                        guest_email: booking.guest_email.clone(),
                        price_per_day,
                    },
                );
            }
        }

        Self { days }
    }

    /// Details for a day, `None` when nobody stays
    pub fn get(&self, date: NaiveDate) -> Option<&OccupiedDay> {
        self.days.get(&date)
    }

    /// Whether no booking covers `date`
    pub fn is_free(&self, date: NaiveDate) -> bool {
        !self.days.contains_key(&date)
    }

    /// Number of occupied days
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the calendar holds no days at all
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
