use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// Hostname-with-TLD shape (2-256 name chars, 2-6 letter TLD, optional tail),
// matched anywhere in the text. The TLD ends at an ASCII word boundary, so an
// accented letter right after it still terminates the TLD.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,6}(?-u:\b)[-a-zA-Z0-9@:%_+.~#?&/=]*")
        .unwrap()
});

/// Everything a scanned payload can decode to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Url,
    Text,
    Tel,
    Sms,
    Email,
    Geo,
    Wifi,
    Contact,
    Event,
}

impl ContentType {
    /// Every recognized type, in display order.
    pub const ALL: [ContentType; 9] = [
        ContentType::Url,
        ContentType::Text,
        ContentType::Tel,
        ContentType::Sms,
        ContentType::Email,
        ContentType::Geo,
        ContentType::Wifi,
        ContentType::Contact,
        ContentType::Event,
    ];

    /// Stable lowercase label, same as the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Text => "text",
            ContentType::Tel => "tel",
            ContentType::Sms => "sms",
            ContentType::Email => "email",
            ContentType::Geo => "geo",
            ContentType::Wifi => "wifi",
            ContentType::Contact => "contact",
            ContentType::Event => "event",
        }
    }

    /// Case-insensitive reverse of [`label`](Self::label).
    pub fn from_label(label: &str) -> Option<ContentType> {
        let lower = label.to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.label() == lower)
    }

    /// Field titles this type's extractor produces, in output order.
    pub fn field_titles(self) -> &'static [&'static str] {
        match self {
            ContentType::Url => &["link"],
            ContentType::Text => &["text"],
            ContentType::Tel => &["number"],
            ContentType::Sms => &["to", "message"],
            ContentType::Email => &["to", "subject", "body"],
            ContentType::Geo => &["longitude", "latitude"],
            ContentType::Wifi => &["ssid", "encryption", "password"],
            ContentType::Contact => &["name", "surname", "full name", "phone", "email"],
            ContentType::Event => &["title", "location", "description", "start", "end"],
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decide the content type of a raw payload.
///
/// Keyword dispatch happens on the text before the first `:`, uppercased.
/// `BEGIN` payloads route on their verbatim first line and stay TEXT when it
/// is unrecognized; only the default path consults the URL pattern.
pub fn classify(raw: &str) -> ContentType {
    let keyword = raw.split(':').next().unwrap_or("").to_uppercase();

    match keyword.as_str() {
        "SMS" => ContentType::Sms,
        "WIFI" => ContentType::Wifi,
        "GEO" => ContentType::Geo,
        "TEL" => ContentType::Tel,
        "MAILTO" => ContentType::Email,
        "BEGIN" => match raw.lines().next().unwrap_or("") {
            "BEGIN:VCARD" => ContentType::Contact,
            "BEGIN:VEVENT" => ContentType::Event,
            _ => ContentType::Text,
        },
        _ if looks_like_url(raw) => ContentType::Url,
        _ => ContentType::Text,
    }
}

/// True when the payload contains a hostname-looking token.
pub fn looks_like_url(text: &str) -> bool {
    URL_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_case_insensitive() {
        assert_eq!(classify("sms:123:hi"), ContentType::Sms);
        assert_eq!(classify("WiFi:S:net;"), ContentType::Wifi);
        assert_eq!(classify("mailto:a@b.com"), ContentType::Email);
        assert_eq!(classify("TEL:555"), ContentType::Tel);
        assert_eq!(classify("geo:1,2"), ContentType::Geo);
    }

    #[test]
    fn keyword_uppercased_unicode() {
        // dotless ı uppercases to I
        assert_eq!(classify("wıfı:S:net;"), ContentType::Wifi);
    }

    #[test]
    fn first_token_wins() {
        assert_eq!(classify("SMS:WIFI:x"), ContentType::Sms);
    }

    #[test]
    fn bare_keyword() {
        assert_eq!(classify("WIFI"), ContentType::Wifi);
        assert_eq!(classify("tel"), ContentType::Tel);
    }

    #[test]
    fn begin_first_line_verbatim() {
        assert_eq!(classify("BEGIN:VCARD\nEND:VCARD"), ContentType::Contact);
        assert_eq!(classify("BEGIN:VEVENT\nEND:VEVENT"), ContentType::Event);
        assert_eq!(classify("begin:vcard\nEND:VCARD"), ContentType::Text);
        assert_eq!(classify("BEGIN:VTODO\nEND:VTODO"), ContentType::Text);
    }

    #[test]
    fn begin_body_never_upgrades_to_url() {
        assert_eq!(classify("BEGIN:VTODO\nhttps://example.com"), ContentType::Text);
    }

    #[test]
    fn url_fallback() {
        assert_eq!(classify("https://example.com/path"), ContentType::Url);
        assert_eq!(classify("example.com"), ContentType::Url);
        assert_eq!(classify("see example.com for details"), ContentType::Url);
    }

    #[test]
    fn plain_text() {
        assert_eq!(classify("hello world"), ContentType::Text);
        assert_eq!(classify(""), ContentType::Text);
    }

    #[test]
    fn tld_length_bounds() {
        // 2+ name chars before the dot, 2-6 letter tld
        assert_eq!(classify("a.bc"), ContentType::Text);
        assert_eq!(classify("ab.c"), ContentType::Text);
        assert_eq!(classify("ab.cd"), ContentType::Url);
        assert_eq!(classify("ab.toolongtld"), ContentType::Text);
    }

    #[test]
    fn tld_boundary_is_ascii() {
        // An accent straight after the tld ends it, like any non-word char
        assert_eq!(classify("ab.cdé"), ContentType::Url);
        assert_eq!(classify("ab.cdx7"), ContentType::Text);
    }

    #[test]
    fn labels_round_trip() {
        for t in ContentType::ALL {
            assert_eq!(ContentType::from_label(t.label()), Some(t));
        }
        assert_eq!(ContentType::from_label("WIFI"), Some(ContentType::Wifi));
        assert_eq!(ContentType::from_label("bogus"), None);
    }

    #[test]
    fn serialized_as_label() {
        let json = serde_json::to_string(&ContentType::Contact).unwrap();
        assert_eq!(json, "\"contact\"");
    }
}
