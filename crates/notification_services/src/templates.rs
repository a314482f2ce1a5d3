use occupancy::Event;

/// Values rendered into a gap offer email
#[derive(Debug, Clone, Copy)]
pub struct OfferContext<'a> {
    /// Guest display name used in the greeting
    pub guest_name: &'a str,
    /// Name of the booked unit
    pub unit_name: &'a str,
    /// Arrival inside the target week, if any
    pub arrival: Option<&'a Event>,
    /// Departure inside the target week, if any
    pub departure: Option<&'a Event>,
}

/// Subject line of a gap offer email
pub fn offer_subject(unit_name: &str) -> String {
    format!("Exklusives Angebot für Ihren Aufenthalt in {}", unit_name)
}

/// Render the HTML body of a gap offer email.
///
/// The arrival and departure sections are rendered independently; a context
/// without either yields a greeting without offers.
pub fn render_offer_email(context: &OfferContext<'_>) -> String {
    let unit_name = escape_html(context.unit_name);
    let mut offers = String::new();

    if let Some(arrival) = context.arrival {
        offers.push_str(&offer_section(
            "Früher anreisen",
            &format!(
                "Vor Ihrer Anreise am {} ist {} in {} noch frei.",
                arrival.date.format("%d.%m.%Y"),
                free_days_label(arrival.free_days),
                unit_name
            ),
            arrival,
        ));
    }

    if let Some(departure) = context.departure {
        offers.push_str(&offer_section(
            "Länger bleiben",
            &format!(
                "Nach Ihrer Abreise am {} ist {} in {} noch frei.",
                departure.date.format("%d.%m.%Y"),
                free_days_label(departure.free_days),
                unit_name
            ),
            departure,
        ));
    }

    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <div style="background: #2c3e50; padding: 20px; text-align: center;">
        <h1 style="color: white; margin: 0;">{unit_name}</h1>
    </div>
    <div style="padding: 30px; background: white;">
        <h2 style="color: #2c3e50;">Hallo {guest_name},</h2>
        <p style="font-size: 16px; line-height: 1.6; color: #374151;">
            wir freuen uns auf Ihren Aufenthalt in {unit_name}. Für Sie haben wir ein exklusives Angebot:
        </p>
{offers}        <p style="font-size: 14px; color: #6b7280;">
            Antworten Sie einfach auf diese E-Mail, um das Angebot anzunehmen.
        </p>
    </div>
</body>
</html>
"#,
        unit_name = unit_name,
        guest_name = escape_html(context.guest_name),
        offers = offers,
    )
}

fn offer_section(title: &str, text: &str, event: &Event) -> String {
    format!(
        r#"        <div style="border-left: 4px solid #4a6741; padding: 10px 20px; margin: 20px 0;">
            <h3 style="color: #4a6741; margin: 0 0 10px 0;">{}</h3>
            <p style="margin: 0;">{}</p>
            <p style="margin: 10px 0 0 0;">Statt <s>€{:.2}</s> nur <strong>€{:.2}</strong> pro Nacht.</p>
        </div>
"#,
        title, text, event.price, event.offer_price
    )
}

fn free_days_label(free_days: u8) -> String {
    match free_days {
        0 => "kein zusätzlicher Tag".to_string(),
        1 => "1 Tag".to_string(),
        n => format!("{} Tage", n),
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
