use std::sync::Arc;

use occupancy::{Event, EventKind};

use crate::email_service::EmailService;
use crate::templates::{OfferContext, offer_subject, render_offer_email};

/// Events of one guest within a unit, in date order
#[derive(Debug, Clone, PartialEq)]
pub struct GuestEvents<'a> {
    /// Address the offer is sent to
    pub guest_email: &'a str,
    /// Name taken from the guest's first event
    pub guest_name: &'a str,
    /// The guest's events
    pub events: Vec<&'a Event>,
}

impl<'a> GuestEvents<'a> {
    /// First arrival of the guest
    pub fn arrival(&self) -> Option<&'a Event> {
        self.first_of(EventKind::Arrival)
    }

    /// First departure of the guest
    pub fn departure(&self) -> Option<&'a Event> {
        self.first_of(EventKind::Departure)
    }

    fn first_of(&self, kind: EventKind) -> Option<&'a Event> {
        self.events.iter().copied().find(|event| event.kind == kind)
    }
}

/// Group events by guest email, keeping the order in which guests first appear
pub fn group_events_by_guest(events: &[Event]) -> Vec<GuestEvents<'_>> {
    let mut guests: Vec<GuestEvents<'_>> = Vec::new();

    for event in events {
        match guests
            .iter()
            .position(|guest| guest.guest_email == event.guest_email)
        {
            Some(index) => guests[index].events.push(event),
            None => guests.push(GuestEvents {
                guest_email: &event.guest_email,
                guest_name: &event.guest_name,
                events: vec![event],
            }),
        }
    }

    guests
}

/// Outcome of sending the offers of one unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Emails accepted by the transport
    pub sent: usize,
    /// Emails that failed to render or send
    pub failed: usize,
}

impl std::ops::AddAssign for DispatchSummary {
    fn add_assign(&mut self, other: Self) {
        self.sent += other.sent;
        self.failed += other.failed;
    }
}

/// Sends gap offer emails to the guests of a unit
pub struct OfferDispatcher {
    email_service: Arc<dyn EmailService>,
}

impl OfferDispatcher {
    /// Create a dispatcher delivering through `email_service`
    pub fn new(email_service: Arc<dyn EmailService>) -> Self {
        Self { email_service }
    }

    /// Send one offer per guest with an arrival or departure in `events`.
    ///
    /// Failures are logged and counted; the remaining guests are still served.
    pub async fn send_offers_for_unit(&self, unit_name: &str, events: &[Event]) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for guest in group_events_by_guest(events) {
            let subject = offer_subject(unit_name);
            let body = render_offer_email(&OfferContext {
                guest_name: guest.guest_name,
                unit_name,
                arrival: guest.arrival(),
                departure: guest.departure(),
            });

            match self
                .email_service
                .send_email(guest.guest_email, &subject, &body)
                .await
            {
                Ok(receipt) => {
                    log::info!(
                        "Offer for {} sent to {} ({})",
                        unit_name,
                        guest.guest_email,
                        receipt
                    );
                    summary.sent += 1;
                }
                Err(e) => {
                    log::error!(
                        "❌ Failed to send offer for {} to {}: {}",
                        unit_name,
                        guest.guest_email,
                        e
                    );
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}
