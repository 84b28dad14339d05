//! Field-level coercion between stored documents and API records.
//!
//! Documents written by different clients disagree on representation: an
//! amount may be the string `"1500"` or the double `1500.0`, a timeline the
//! string `"12"` or the integer `12`. These helpers normalise each logical
//! field to one API type and fall back to the zero value when the field is
//! missing or holds something unusable.

use chrono::SecondsFormat;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

/// String field; non-string values read as empty.
pub fn text(doc: &Document, key: &str) -> String {
    match doc.get(key) {
        Some(Bson::String(value)) => value.clone(),
        _ => String::new(),
    }
}

/// First key that holds a string, for fields stored under more than one name.
pub fn text_any(doc: &Document, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match doc.get(*key) {
            Some(Bson::String(value)) => Some(value.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

/// Whole number stored as an integer, an integral double, or numeric text.
pub fn integer(doc: &Document, key: &str) -> i64 {
    match doc.get(key) {
        Some(Bson::Int32(value)) => i64::from(*value),
        Some(Bson::Int64(value)) => *value,
        Some(Bson::Double(value)) if is_whole(*value) => *value as i64,
        Some(Bson::String(value)) => value.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Monetary amount rendered with two decimals unless it was stored as text.
pub fn amount(doc: &Document, key: &str) -> String {
    match doc.get(key) {
        Some(Bson::String(value)) => value.clone(),
        Some(Bson::Double(value)) => format_amount(*value),
        Some(Bson::Int32(value)) => format!("{}.00", value),
        Some(Bson::Int64(value)) => format!("{}.00", value),
        _ => String::new(),
    }
}

/// Duration-like count rendered in decimal unless it was stored as text.
pub fn timeline(doc: &Document, key: &str) -> String {
    match doc.get(key) {
        Some(Bson::String(value)) => value.clone(),
        Some(Bson::Int32(value)) => value.to_string(),
        Some(Bson::Int64(value)) => value.to_string(),
        Some(Bson::Double(value)) => format_timeline(*value),
        _ => String::new(),
    }
}

/// Date stored either as text or as a native datetime (RFC 3339 on the way out).
pub fn date(doc: &Document, key: &str) -> String {
    match doc.get(key) {
        Some(Bson::String(value)) => value.clone(),
        Some(Bson::DateTime(value)) => value
            .to_chrono()
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        _ => String::new(),
    }
}

pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_timeline(value: f64) -> String {
    // f64's Display already drops the fraction of whole numbers: 12.0 -> "12".
    format!("{}", value)
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64
}

/// A request field clients send either as a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    pub fn is_blank(&self) -> bool {
        matches!(self, TextOrNumber::Text(value) if value.trim().is_empty())
    }

    /// Canonical text of an amount, matching what [`amount`] reads back.
    pub fn into_amount(self) -> String {
        match self {
            TextOrNumber::Text(value) => value,
            TextOrNumber::Number(number) => match number.as_i64() {
                Some(whole) => format!("{}.00", whole),
                None => format_amount(number.as_f64().unwrap_or_default()),
            },
        }
    }

    /// Canonical text of a timeline, matching what [`timeline`] reads back.
    pub fn into_timeline(self) -> String {
        match self {
            TextOrNumber::Text(value) => value,
            TextOrNumber::Number(number) => match number.as_i64() {
                Some(whole) => whole.to_string(),
                None => format_timeline(number.as_f64().unwrap_or_default()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, DateTime};

    #[test]
    fn amount_accepts_text_double_and_integer() {
        let stored = doc! {
            "as_text": "2500",
            "as_double": 1500.5,
            "as_int": 42_i32,
            "as_long": 7_000_000_i64,
            "as_bool": true,
        };

        assert_eq!(amount(&stored, "as_text"), "2500");
        assert_eq!(amount(&stored, "as_double"), "1500.50");
        assert_eq!(amount(&stored, "as_int"), "42.00");
        assert_eq!(amount(&stored, "as_long"), "7000000.00");
        assert_eq!(amount(&stored, "as_bool"), "");
        assert_eq!(amount(&stored, "missing"), "");
    }

    #[test]
    fn timeline_accepts_text_integer_and_double() {
        let stored = doc! {
            "as_text": "24 months",
            "as_long": 36_i64,
            "whole_double": 12.0,
            "fractional": 2.5,
        };

        assert_eq!(timeline(&stored, "as_text"), "24 months");
        assert_eq!(timeline(&stored, "as_long"), "36");
        assert_eq!(timeline(&stored, "whole_double"), "12");
        assert_eq!(timeline(&stored, "fractional"), "2.5");
    }

    #[test]
    fn integer_tolerates_doubles_and_numeric_text() {
        let stored = doc! {
            "int32": 31_i32,
            "int64": 45_i64,
            "whole": 29.0,
            "fractional": 29.5,
            "text": " 33 ",
            "junk": "thirty",
        };

        assert_eq!(integer(&stored, "int32"), 31);
        assert_eq!(integer(&stored, "int64"), 45);
        assert_eq!(integer(&stored, "whole"), 29);
        assert_eq!(integer(&stored, "fractional"), 0);
        assert_eq!(integer(&stored, "text"), 33);
        assert_eq!(integer(&stored, "junk"), 0);
    }

    #[test]
    fn text_ignores_non_strings() {
        let stored = doc! { "name": "Asha", "city": 12 };
        assert_eq!(text(&stored, "name"), "Asha");
        assert_eq!(text(&stored, "city"), "");
    }

    #[test]
    fn text_any_prefers_first_present_key() {
        let legacy = doc! { "marrital_status": "single" };
        let both = doc! { "marital_status": "married", "marrital_status": "single" };

        assert_eq!(text_any(&legacy, &["marital_status", "marrital_status"]), "single");
        assert_eq!(text_any(&both, &["marital_status", "marrital_status"]), "married");
    }

    #[test]
    fn date_formats_native_datetimes() {
        let stored = doc! {
            "text": "2024-01-15",
            "native": DateTime::from_millis(1_705_276_800_000),
        };

        assert_eq!(date(&stored, "text"), "2024-01-15");
        assert_eq!(date(&stored, "native"), "2024-01-15T00:00:00Z");
    }

    #[test]
    fn request_numbers_normalise_like_stored_numbers() {
        let amount: TextOrNumber = serde_json::from_str("1500.5").unwrap();
        let whole_amount: TextOrNumber = serde_json::from_str("2000").unwrap();
        let timeline: TextOrNumber = serde_json::from_str("12").unwrap();
        let text: TextOrNumber = serde_json::from_str("\"5 years\"").unwrap();

        assert_eq!(amount.into_amount(), "1500.50");
        assert_eq!(whole_amount.into_amount(), "2000.00");
        assert_eq!(timeline.into_timeline(), "12");
        assert_eq!(text.into_timeline(), "5 years");
    }

    #[test]
    fn blank_text_is_detected() {
        assert!(TextOrNumber::Text("  ".into()).is_blank());
        assert!(!TextOrNumber::Number(serde_json::Number::from(0)).is_blank());
    }
}
