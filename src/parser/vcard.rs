use std::collections::HashMap;

/// One decoded property line: its value split into `;`-separated components.
#[derive(Debug, Clone)]
pub struct Property {
    components: Vec<String>,
}

impl Property {
    fn component(&self, index: usize) -> &str {
        self.components.get(index).map(String::as_str).unwrap_or("")
    }

    fn value(&self) -> String {
        self.components.join(";")
    }
}

/// A decoded contact card: lowercased property name to its occurrences, in
/// input order. Decoding never fails; missing data surfaces as empty strings
/// at the accessors.
#[derive(Debug, Default)]
pub struct ContactCard {
    properties: HashMap<String, Vec<Property>>,
}

impl ContactCard {
    pub fn decode(raw: &str) -> ContactCard {
        let mut card = ContactCard::default();

        for line in unfold(raw) {
            let Some((head, value)) = line.split_once(':') else {
                continue;
            };
            // Parameters (TEL;TYPE=CELL) come off before the group prefix
            // (item1.EMAIL); a dot inside a parameter is not a group delimiter.
            let head = head.split(';').next().unwrap_or("");
            let name = head
                .split_once('.')
                .map_or(head, |(_, rest)| rest)
                .trim()
                .to_lowercase();
            if name.is_empty() || name == "begin" || name == "end" {
                continue;
            }
            card.properties
                .entry(name)
                .or_default()
                .push(Property { components: split_components(value) });
        }

        card
    }

    fn first(&self, name: &str) -> Option<&Property> {
        self.properties.get(name).and_then(|occurrences| occurrences.first())
    }

    /// Component `index` of the first `name` property, or "".
    pub fn component(&self, name: &str, index: usize) -> &str {
        self.first(name).map(|p| p.component(index)).unwrap_or("")
    }

    /// Full value of the first `name` property (components rejoined), or "".
    pub fn value(&self, name: &str) -> String {
        self.first(name).map(Property::value).unwrap_or_default()
    }
}

/// Join folded continuation lines (leading space or tab) onto the line above.
fn unfold(raw: &str) -> Vec<String> {
    let mut logical: Vec<String> = Vec::new();
    for line in raw.lines() {
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(prev) = logical.last_mut() {
                prev.push_str(line.trim());
                continue;
            }
        }
        let line = line.trim();
        if !line.is_empty() {
            logical.push(line.to_string());
        }
    }
    logical
}

/// Split a property value on unescaped `;`, resolving backslash escapes.
fn split_components(value: &str) -> Vec<String> {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') | Some('N') => current.push('\n'),
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            ';' => components.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    components.push(current);
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = "BEGIN:VCARD\nVERSION:3.0\nN:Gump;Forrest;;Mr.;\nFN:Forrest Gump\nTEL;TYPE=CELL:+1-111-555-1212\nEMAIL:forrest@example.com\nEND:VCARD";

    #[test]
    fn name_components() {
        let card = ContactCard::decode(CARD);
        assert_eq!(card.component("n", 0), "Gump");
        assert_eq!(card.component("n", 1), "Forrest");
        assert_eq!(card.component("n", 3), "Mr.");
    }

    #[test]
    fn full_value() {
        let card = ContactCard::decode(CARD);
        assert_eq!(card.value("fn"), "Forrest Gump");
        assert_eq!(card.value("version"), "3.0");
    }

    #[test]
    fn parameters_stripped() {
        let card = ContactCard::decode(CARD);
        assert_eq!(card.value("tel"), "+1-111-555-1212");
    }

    #[test]
    fn group_prefix_stripped() {
        let card = ContactCard::decode("item1.EMAIL;TYPE=INTERNET:agent@example.com");
        assert_eq!(card.value("email"), "agent@example.com");
    }

    #[test]
    fn dotted_parameter_value_keeps_name() {
        let card = ContactCard::decode("BEGIN:VCARD\nTEL;TYPE=X.400:+15551212\nEND:VCARD");
        assert_eq!(card.value("tel"), "+15551212");
    }

    #[test]
    fn folded_line_joined() {
        let card = ContactCard::decode("NOTE:first part\n  second part\nFN:X");
        assert_eq!(card.value("note"), "first partsecond part");
        assert_eq!(card.value("fn"), "X");
    }

    #[test]
    fn escaped_separators() {
        let card = ContactCard::decode("ADR:;;123 Main\\;B;Town");
        assert_eq!(card.component("adr", 2), "123 Main;B");
        assert_eq!(card.component("adr", 3), "Town");
    }

    #[test]
    fn newline_escape() {
        let card = ContactCard::decode("NOTE:line one\\nline two");
        assert_eq!(card.value("note"), "line one\nline two");
    }

    #[test]
    fn first_occurrence_wins() {
        let card = ContactCard::decode("TEL:111\nTEL:222");
        assert_eq!(card.value("tel"), "111");
    }

    #[test]
    fn missing_property_is_empty() {
        let card = ContactCard::decode(CARD);
        assert_eq!(card.value("org"), "");
        assert_eq!(card.component("n", 9), "");
    }

    #[test]
    fn begin_end_skipped() {
        let card = ContactCard::decode(CARD);
        assert_eq!(card.value("begin"), "");
        assert_eq!(card.value("end"), "");
    }

    #[test]
    fn lines_without_colon_skipped() {
        let card = ContactCard::decode("garbage line\nFN:Real Name");
        assert_eq!(card.value("fn"), "Real Name");
    }
}
