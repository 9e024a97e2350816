use std::collections::HashMap;

/// Decoded VEVENT properties: raw key to raw value, last occurrence winning.
///
/// Each line is split on `:`, so the value is the segment between the first
/// and second colon. A single leading space (folded line) is dropped before
/// the split.
#[derive(Debug, Default)]
pub struct EventRecord {
    properties: HashMap<String, String>,
}

impl EventRecord {
    pub fn decode(raw: &str) -> EventRecord {
        let mut record = EventRecord::default();
        for line in raw.lines() {
            let line = line.strip_prefix(' ').unwrap_or(line);
            let mut parts = line.split(':');
            let key = parts.next().unwrap_or("");
            let value = parts.next().unwrap_or("");
            record.properties.insert(key.to_string(), value.to_string());
        }
        record
    }

    /// Value of `key` (case-sensitive), or "" when the event never carried it.
    pub fn get(&self, key: &str) -> &str {
        self.properties.get(key).map(String::as_str).unwrap_or("")
    }
}
