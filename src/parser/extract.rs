use super::vcard::ContactCard;
use super::vevent::EventRecord;
use super::Field;

/// The payload untouched, labeled `link`.
pub fn url(raw: &str) -> Vec<Field> {
    vec![Field::new("link", raw)]
}

/// The payload untouched, labeled `text`.
pub fn text(raw: &str) -> Vec<Field> {
    vec![Field::new("text", raw)]
}

/// `TEL:<number>`: the number is everything after the first colon.
pub fn tel(raw: &str) -> Vec<Field> {
    vec![Field::new("number", after_keyword(raw))]
}

/// `SMS:<to>:<message>`: flat colon segments, missing ones empty.
pub fn sms(raw: &str) -> Vec<Field> {
    let mut segments = raw.split(':').skip(1);
    let to = segments.next().unwrap_or("");
    let message = segments.next().unwrap_or("");
    vec![Field::new("to", to), Field::new("message", message)]
}

/// `geo:<longitude>,<latitude>`: the tail after the first colon, split on `,`.
pub fn geo(raw: &str) -> Vec<Field> {
    let mut segments = after_keyword(raw).split(',');
    let longitude = segments.next().unwrap_or("");
    let latitude = segments.next().unwrap_or("");
    vec![
        Field::new("longitude", longitude),
        Field::new("latitude", latitude),
    ]
}

/// `WIFI:S:<ssid>;T:<encryption>;P:<password>;` holds `;`-separated segments
/// in any order, each split on its first colon. Values may contain `:` but
/// not `;` (the convention has no escapes).
pub fn wifi(raw: &str) -> Vec<Field> {
    let mut ssid = "";
    let mut encryption = "";
    let mut password = "";
    for segment in after_keyword(raw).split(';') {
        let Some((key, value)) = segment.split_once(':') else {
            continue;
        };
        match key {
            "S" => ssid = value,
            "T" => encryption = value,
            "P" => password = value,
            _ => {}
        }
    }
    vec![
        Field::new("ssid", ssid),
        Field::new("encryption", encryption),
        Field::new("password", password),
    ]
}

/// `MAILTO:<to>?<key=value>&<key=value>`: only the first two parameters are
/// inspected, keys matched case-insensitively, values cut at the next `=`.
pub fn email(raw: &str) -> Vec<Field> {
    let mut segments = after_keyword(raw).split('?');
    let to = segments.next().unwrap_or("");
    let mut subject = "";
    let mut body = "";
    if let Some(query) = segments.next() {
        for param in query.split('&').take(2) {
            let mut kv = param.split('=');
            let key = kv.next().unwrap_or("");
            let value = kv.next().unwrap_or("");
            if key.eq_ignore_ascii_case("subject") {
                subject = value;
            } else if key.eq_ignore_ascii_case("body") {
                body = value;
            }
        }
    }
    vec![
        Field::new("to", to),
        Field::new("subject", subject),
        Field::new("body", body),
    ]
}

/// `BEGIN:VCARD` block. The structured name property stores surname first
/// and given name second; the phone value may carry a `tel:` scheme prefix.
pub fn contact(raw: &str) -> Vec<Field> {
    let card = ContactCard::decode(raw);
    let phone = card.value("tel");
    let phone = phone.strip_prefix("tel:").unwrap_or(&phone);
    vec![
        Field::new("name", card.component("n", 1)),
        Field::new("surname", card.component("n", 0)),
        Field::new("full name", card.value("fn")),
        Field::new("phone", phone),
        Field::new("email", card.value("email")),
    ]
}

/// `BEGIN:VEVENT` block; recognized property keys map onto the fixed titles.
pub fn event(raw: &str) -> Vec<Field> {
    let record = EventRecord::decode(raw);
    vec![
        Field::new("title", record.get("SUMMARY")),
        Field::new("location", record.get("LOCATION")),
        Field::new("description", record.get("DESCRIPTION")),
        Field::new("start", record.get("DTSTART")),
        Field::new("end", record.get("DTEND")),
    ]
}

fn after_keyword(raw: &str) -> &str {
    raw.split_once(':').map(|(_, rest)| rest).unwrap_or("")
}
