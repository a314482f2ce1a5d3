use occupancy::{DateRange, Event, EventKind, FreeDaysRating};

use crate::colors::ColorScheme;

/// Colour-coded arrivals and departures of one unit within `range`
pub fn format_unoccupied_days(unit_name: &str, range: &DateRange, events: &[Event]) -> String {
    let header = format!(
        "{}📅 Arrivals and Departures for {} from {} to {}:{}",
        ColorScheme::BLUE,
        unit_name,
        range.start,
        range.end,
        ColorScheme::RESET
    );

    if events.is_empty() {
        return format!(
            "{}\n{}No events in this period{}",
            header,
            ColorScheme::CYAN,
            ColorScheme::RESET
        );
    }

    let blocks: Vec<String> = events.iter().map(format_event).collect();

    format!("{}\n{}", header, blocks.join("\n\n"))
}

fn format_event(event: &Event) -> String {
    let (icon, label, days_text) = match event.kind {
        EventKind::Arrival => ("🏡️", "Arrival", "before arrival"),
        EventKind::Departure => ("🧼", "Departure", "after departure"),
    };
    let plural = if event.free_days == 1 { "" } else { "s" };
    let days_color = ColorScheme::for_rating(FreeDaysRating::from_free_days(event.free_days));

    format!(
        "{green}{icon} {label} on {date}:{reset}\n\
         {cyan}    👤 Guest: {name}\n\
         \x20   📧 {email}{reset}\n\
         {days_color}    ⏱ {free_days} day{plural} free {days_text}{reset}\n\
         {yellow}    💰 Original price: €{price:.2}/day\n\
         \x20   🏷️ Offer price: €{offer:.2}/day{reset}",
        green = ColorScheme::GREEN,
        cyan = ColorScheme::CYAN,
        yellow = ColorScheme::YELLOW,
        reset = ColorScheme::RESET,
        date = event.date.format("%Y-%m-%d"),
        name = event.guest_name,
        email = event.guest_email,
        free_days = event.free_days,
        price = event.price,
        offer = event.offer_price,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn event(kind: EventKind, day: u32, free_days: u8) -> Event {
        Event {
            date: date(day),
            kind,
            guest_name: "Anna".to_string(),
            guest_email: "anna@example.com".to_string(),
            free_days,
            price: 100.0,
            offer_price: 57.0,
        }
    }

    #[test]
    fn test_empty_period() {
        let output = format_unoccupied_days("Seeblick", &DateRange::new(date(15), date(21)), &[]);

        assert!(output.contains("Arrivals and Departures for Seeblick from 2024-01-15 to 2024-01-21:"));
        assert!(output.contains("No events in this period"));
    }

    #[test]
    fn test_event_lines_and_colors() {
        let events = vec![
            event(EventKind::Arrival, 15, 2),
            event(EventKind::Departure, 18, 1),
            event(EventKind::Departure, 20, 0),
        ];
        let output = format_unoccupied_days("Seeblick", &DateRange::new(date(15), date(21)), &events);

        assert!(output.contains("🏡️ Arrival on 2024-01-15:"));
        assert!(output.contains("    👤 Guest: Anna\n    📧 anna@example.com"));
        assert!(output.contains(&format!("{}    ⏱ 2 days free before arrival", ColorScheme::GREEN)));
        assert!(output.contains(&format!("{}    ⏱ 1 day free after departure", ColorScheme::YELLOW)));
        assert!(output.contains(&format!("{}    ⏱ 0 days free after departure", ColorScheme::RED)));
        assert!(output.contains("💰 Original price: €100.00/day"));
        assert!(output.contains("🏷️ Offer price: €57.00/day"));
        assert!(!output.contains("No events in this period"));
    }
}
