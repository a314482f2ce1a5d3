//! # Occupancy
//!
//! This crate provides the booking data model and the occupancy gap analysis used
//! to find short unoccupied periods around arrivals and departures.

/// Types shared by the analysis (bookings, date ranges, events)
mod types;
pub use types::*;

/// Per-unit calendar of occupied days
mod calendar;
pub use calendar::*;

/// Arrival/departure gap analysis and offer pricing
mod analyzer;
pub use analyzer::*;
