pub mod classify;
pub mod extract;
mod vcard;
mod vevent;

use serde::Serialize;
use tracing::trace;

pub use classify::{classify, looks_like_url, ContentType};

/// One labeled, display-ready value sliced out of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub title: &'static str,
    pub value: String,
}

impl Field {
    pub fn new(title: &'static str, value: impl Into<String>) -> Field {
        Field {
            title,
            value: value.into(),
        }
    }
}

/// Outcome of one parse: the recognized type and its fields in fixed order.
///
/// The field list for a type always has the same length and title sequence;
/// components the input omitted come back as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub fields: Vec<Field>,
}

impl ParseResult {
    /// One-line preview for list views: the leading field value, plus the
    /// second one for contacts and coordinates.
    pub fn summary(&self) -> String {
        let value = |i: usize| self.fields.get(i).map(|f| f.value.as_str()).unwrap_or("");
        match self.kind {
            ContentType::Contact | ContentType::Geo => format!("{} {}", value(0), value(1)),
            _ => value(0).to_string(),
        }
    }
}

/// Two-pass pipeline: classify the payload, then slice it with that type's
/// extractor. Total over all string inputs, the empty string included.
pub fn parse(raw: &str) -> ParseResult {
    let kind = classify::classify(raw);
    trace!("classified {} byte payload as {}", raw.len(), kind);

    let fields = match kind {
        ContentType::Url => extract::url(raw),
        ContentType::Text => extract::text(raw),
        ContentType::Tel => extract::tel(raw),
        ContentType::Sms => extract::sms(raw),
        ContentType::Email => extract::email(raw),
        ContentType::Geo => extract::geo(raw),
        ContentType::Wifi => extract::wifi(raw),
        ContentType::Contact => extract::contact(raw),
        ContentType::Event => extract::event(raw),
    };

    ParseResult { kind, fields }
}
