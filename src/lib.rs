//! Interpreter and composer for QR-encoded payload conventions.
//!
//! Given a raw string scanned out of a QR code, [`parser::parse`] decides
//! which of nine conventions it follows (URL, plain text, telephone, SMS,
//! email, geolocation, Wi-Fi credentials, vCard contact, vEvent) and slices
//! it into labeled, display-ready fields. Parsing is total: every input,
//! malformed or empty, produces a [`parser::ParseResult`].
//!
//! [`compose`] goes the other way, building payload strings from the same
//! field vocabulary.

pub mod compose;
pub mod parser;

pub use parser::{classify, looks_like_url, parse, ContentType, Field, ParseResult};
