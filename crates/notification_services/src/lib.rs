//! # Notification Services
//!
//! This crate provides email delivery for the application.
//! It includes the mail transport abstraction, the gap offer template and the
//! per-unit dispatch of offer emails to guests.

/// Email transports (SMTP and log-only).
pub mod email_service;
/// Per-unit grouping of events and delivery of offer emails.
pub mod dispatch;
/// HTML template for gap offer emails.
pub mod templates;
/// Types and errors used by the notification services.
pub mod types;

pub use dispatch::{DispatchSummary, GuestEvents, OfferDispatcher, group_events_by_guest};
pub use email_service::{EmailService, MockEmailService, SmtpEmailService};
pub use templates::{OfferContext, offer_subject, render_offer_email};
pub use types::{EmailConfig, NotificationError};
