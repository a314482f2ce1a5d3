use std::collections::BTreeMap;

use occupancy::Booking;
use smoobu_api::{Reservations, UserInfo};

const SEPARATOR: &str = "-----------------------------------------";

/// Account details of the API user
pub fn format_user_info(user: &UserInfo) -> String {
    format!(
        "User Information:\n\
         -----------------\n\
         ID: {}\n\
         Name: {} {}\n\
         Email: {}\n",
        user.id, user.first_name, user.last_name, user.email
    )
}

/// Summary of all reservations with one block per booking
pub fn format_reservations(reservations: &Reservations) -> String {
    let mut output = format!(
        "Reservations Summary:\n\
         ---------------------\n\
         Total Items: {}\n\
         \n\
         Bookings:\n",
        reservations.total_items
    );

    for booking in &reservations.bookings {
        let price = booking
            .price
            .map(|price| format!("€{:.2}", price))
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{}\n\
             Booking ID: {}\n\
             Guest: {}\n\
             Apartment: {}\n\
             Channel: {}\n\
             Arrival: {}\n\
             Departure: {}\n\
             Total Price: {}\n",
            SEPARATOR,
            booking.id,
            or_dash(booking.guest_name.as_deref()),
            or_dash(booking.unit_name()),
            or_dash(booking.channel.as_ref().map(|channel| channel.name.as_str())),
            or_dash(booking.arrival.as_deref()),
            or_dash(booking.departure.as_deref()),
            price
        ));
    }

    output
}

/// Numbered bookings of every unit, sorted by arrival
pub fn format_booking_list(units: &BTreeMap<String, Vec<Booking>>) -> String {
    let mut output = String::from("Booking List by Apartment:\n==========================\n\n");

    for (unit, bookings) in units {
        output.push_str(&format!("{}:\n{}\n", unit, "-".repeat(unit.chars().count())));

        if bookings.is_empty() {
            output.push_str("No bookings for this apartment.\n");
        } else {
            let mut sorted: Vec<&Booking> = bookings.iter().collect();
            sorted.sort_by(|a, b| {
                (a.arrival, a.departure, &a.guest_email, &a.guest_name)
                    .cmp(&(b.arrival, b.departure, &b.guest_email, &b.guest_name))
                    .then(a.price.total_cmp(&b.price))
            });

            for (index, booking) in sorted.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} to {} ({}; {}; €{:.2})\n",
                    index + 1,
                    booking.arrival,
                    booking.departure,
                    booking.guest_email,
                    booking.guest_name,
                    booking.price
                ));
            }
        }

        output.push('\n');
    }

    output
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
