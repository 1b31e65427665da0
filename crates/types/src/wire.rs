//! Lenient decoders for backend payloads.
//!
//! The backend stores provider documents loosely: fields may be missing,
//! `null`, empty strings, numbers-as-strings, or legacy values. These helpers
//! normalize all of that at the deserialization boundary so the rest of the
//! client can work with plain Rust types.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a string or a number; anything else becomes an empty string.
pub(crate) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}

/// `null` and missing values collapse to the empty string.
pub(crate) fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Any `From<String>` value; `null` converts from the empty string.
pub(crate) fn from_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(T::from(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default()))
}

/// `null`, missing and blank values collapse to `None`.
pub(crate) fn optional_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).filter(|text| !text.trim().is_empty()))
}

/// Numbers or numeric strings; anything unparsable is `None`.
pub(crate) fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_decimal(&text),
        _ => None,
    })
}

/// Calendar date from `YYYY-MM-DD` or any string starting with it.
pub(crate) fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).and_then(|text| parse_date(&text)))
}

/// RFC 3339 timestamp, naive timestamp (assumed UTC) or bare date (midnight UTC).
pub(crate) fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).and_then(|text| parse_timestamp(&text)))
}

/// Any `FromStr` value; unknown strings decode as `None`.
pub(crate) fn variant<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).and_then(|text| text.trim().parse().ok()))
}

/// Boolean that tolerates `null` by falling back to `default`.
pub(crate) fn flag_or<'de, D: Deserializer<'de>>(deserializer: D, default: bool) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        _ => default,
    })
}

pub(crate) fn flag_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    flag_or(deserializer, true)
}

pub(crate) fn flag_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    flag_or(deserializer, false)
}

pub(crate) fn default_true() -> bool {
    true
}

/// Parses a currency amount typed by a user. Accepts a comma decimal separator.
pub(crate) fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    let head = trimmed.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn decimal_accepts_comma_separator() {
        assert_eq!(parse_decimal("199,90"), Some(199.9));
        assert_eq!(parse_decimal(" 250 "), Some(250.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn date_accepts_timestamp_prefix() {
        let date = parse_date("2024-03-15T10:00:00Z").expect("date");
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 15));
        assert!(parse_date("15/03/2024").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn timestamp_accepts_naive_and_date_forms() {
        let with_zone = parse_timestamp("2024-03-15T10:30:00+00:00").expect("rfc3339");
        assert_eq!(with_zone.hour(), 10);
        let naive = parse_timestamp("2024-03-15T10:30:00.123456").expect("naive");
        assert_eq!(naive.minute(), 30);
        let bare = parse_timestamp("2024-03-15").expect("bare date");
        assert_eq!(bare.hour(), 0);
        assert!(parse_timestamp("soon").is_none());
    }
}
