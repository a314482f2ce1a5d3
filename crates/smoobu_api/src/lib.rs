//! # Smoobu API
//!
//! This crate provides a client for the Smoobu property-management API, which is used
//! to fetch the account, its reservations and the bookings of every unit.

/// Wire types and the API error
mod types;
pub use types::*;

/// Time-expiring response cache
mod cache;
pub use cache::*;

/// Fixed-window rate limiter for outbound calls
mod rate_limit;
pub use rate_limit::*;

/// HTTP client for the Smoobu REST API
mod client;
pub use client::*;

/// High-level operations (user info, reservations, bookings by unit)
mod service;
pub use service::*;
