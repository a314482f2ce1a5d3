//! # Reports
//!
//! This crate renders the console reports: account details, the reservation
//! summary, bookings per unit and the colour-coded unoccupied days analysis.

/// ANSI colours used by the console reports
mod colors;
pub use colors::*;

/// Account, reservation and booking list reports
mod bookings;
pub use bookings::*;

/// Arrival/departure gap report per unit
mod unoccupied_days;
pub use unoccupied_days::*;
