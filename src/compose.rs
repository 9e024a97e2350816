//! Payload builders, one per content type, using the same field vocabulary
//! the parser emits. Builders are total and emit values verbatim (beyond
//! vCard component escaping), so a value containing its convention's own
//! delimiter will not survive a reparse.

/// The text verbatim.
pub fn text(text: &str) -> String {
    text.to_string()
}

/// The link verbatim.
pub fn url(link: &str) -> String {
    link.to_string()
}

/// `tel:<number>`.
pub fn tel(number: &str) -> String {
    format!("tel:{}", number)
}

/// `SMS:<to>:<message>`.
pub fn sms(to: &str, message: &str) -> String {
    format!("SMS:{}:{}", to, message)
}

/// `geo:<longitude>,<latitude>`.
pub fn geo(longitude: &str, latitude: &str) -> String {
    format!("geo:{},{}", longitude, latitude)
}

/// `WIFI:S:<ssid>;T:<encryption>;P:<password>;` with empty parts omitted.
pub fn wifi(ssid: &str, encryption: &str, password: &str) -> String {
    let mut payload = String::from("WIFI:");
    for (key, value) in [("S", ssid), ("T", encryption), ("P", password)] {
        if !value.is_empty() {
            payload.push_str(key);
            payload.push(':');
            payload.push_str(value);
            payload.push(';');
        }
    }
    payload
}

/// `mailto:<to>` plus `subject`/`body` query parameters for the non-empty
/// parts.
pub fn email(to: &str, subject: &str, body: &str) -> String {
    let mut payload = format!("mailto:{}", to);
    let mut separator = '?';
    for (key, value) in [("subject", subject), ("body", body)] {
        if !value.is_empty() {
            payload.push(separator);
            payload.push_str(key);
            payload.push('=');
            payload.push_str(value);
            separator = '&';
        }
    }
    payload
}

/// A `BEGIN:VCARD` block with the name, phone, and email properties; empty
/// properties are omitted and name components are escaped.
pub fn contact(name: &str, surname: &str, phone: &str, email: &str) -> String {
    let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];
    if !name.is_empty() || !surname.is_empty() {
        lines.push(format!(
            "N:{};{}",
            escape_component(surname),
            escape_component(name)
        ));
    }
    let full_name = format!("{} {}", name, surname);
    let full_name = full_name.trim();
    if !full_name.is_empty() {
        lines.push(format!("FN:{}", full_name));
    }
    if !phone.is_empty() {
        lines.push(format!("TEL:{}", phone));
    }
    if !email.is_empty() {
        lines.push(format!("EMAIL:{}", email));
    }
    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

/// A `BEGIN:VEVENT` block with one `KEY:VALUE` line per non-empty part.
pub fn event(
    title: &str,
    location: &str,
    description: &str,
    start: &str,
    end: &str,
) -> String {
    let mut lines = vec!["BEGIN:VEVENT".to_string()];
    let properties = [
        ("SUMMARY", title),
        ("LOCATION", location),
        ("DESCRIPTION", description),
        ("DTSTART", start),
        ("DTEND", end),
    ];
    for (key, value) in properties {
        if !value.is_empty() {
            lines.push(format!("{}:{}", key, value));
        }
    }
    lines.push("END:VEVENT".to_string());
    lines.join("\n")
}

fn escape_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
