use chrono::{Datelike, Duration, NaiveDate};

/// A validated stay for a single unit
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Name of the rented unit (apartment)
    pub unit_name: String,
    /// First day of the stay
    pub arrival: NaiveDate,
    /// Last day of the stay
    pub departure: NaiveDate,
    /// Email address of the guest
    pub guest_email: String,
    /// Display name of the guest
    pub guest_name: String,
    /// Total price of the stay
    pub price: f64,
}

impl Booking {
    /// Number of calendar days covered by the stay, both endpoints included
    pub fn days_inclusive(&self) -> i64 {
        (self.departure - self.arrival).num_days() + 1
    }

    /// Average price per covered day
    pub fn price_per_day(&self) -> f64 {
        self.price / self.days_inclusive() as f64
    }
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day of the range
    pub start: NaiveDate,
    /// Last day of the range
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range from two inclusive endpoints
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The week after next, aligned to start on a Monday.
    ///
    /// `start = today + (14 - weekday)` with Monday as weekday 0, and the range
    /// spans seven days.
    pub fn target_week(today: NaiveDate) -> Self {
        let offset = 14 - i64::from(today.weekday().num_days_from_monday());
        let start = today + Duration::days(offset);

        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Iterate every day of the range in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Whether `date` lies inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Role of an occupied day within its booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayRole {
    /// First day of a stay
    Arrival,
    /// Last day of a stay
    Departure,
    /// Any day strictly between arrival and departure
    Occupied,
}

/// Kind of event reported by the gap analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A guest arrives on the event date
    Arrival,
    /// A guest leaves on the event date
    Departure,
}

impl EventKind {
    /// Event kind for a day role, `None` for interior days
    pub fn from_role(role: DayRole) -> Option<Self> {
        match role {
            DayRole::Arrival => Some(EventKind::Arrival),
            DayRole::Departure => Some(EventKind::Departure),
            DayRole::Occupied => None,
        }
    }

    /// Lowercase label (`arrival` / `departure`)
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Arrival => "arrival",
            EventKind::Departure => "departure",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An arrival or departure inside the target week together with offer pricing
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Day of the arrival or departure
    pub date: NaiveDate,
    /// Whether the guest arrives or leaves
    pub kind: EventKind,
    /// Guest display name
    pub guest_name: String,
    /// Guest email address
    pub guest_email: String,
    /// Free days directly before an arrival or after a departure (0 to 2)
    pub free_days: u8,
    /// Average price per day of the underlying booking
    pub price: f64,
    /// Discounted price per day offered to the guest
    pub offer_price: f64,
}

/// How attractive a gap is, derived from the free day count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeDaysRating {
    /// Two free days
    Best,
    /// One free day
    Medium,
    /// No free day
    Worst,
}

impl FreeDaysRating {
    /// Rate a free day count
    pub fn from_free_days(free_days: u8) -> Self {
        match free_days {
            2 => FreeDaysRating::Best,
            1 => FreeDaysRating::Medium,
            _ => FreeDaysRating::Worst,
        }
    }
}
