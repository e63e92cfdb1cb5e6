//! Schema-tolerant field lookup over arbitrary JSON records.
//!
//! Upstream pool payloads have used many names for the same quantity across
//! API versions. Each logical field is described by an ordered list of
//! accessor paths; the first path that resolves to a non-null value wins.
//! Paths are dot-separated keys, with numeric segments indexing into arrays
//! (`"tokens.0.symbol"`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::utils::epoch_to_datetime;

/// Characters kept when reading a number out of a string
fn numeric_noise() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| Regex::new(r"[^0-9eE+\-.]").expect("static regex is valid"))
}

/// Walk one accessor path. Stops at the first segment that does not
/// address into an object or array.
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Return the value of the first candidate path that is present and non-null
pub fn first_present<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|path| resolve_path(record, path))
        .find(|value| !value.is_null())
}

/// Coerce a JSON value to a finite number, falling back to `default`.
///
/// Strings are stripped of everything but digits, sign, decimal point and
/// exponent markers before parsing, so `"$1,234.50"` reads as `1234.5`.
pub fn coerce_number(value: Option<&Value>, default: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let cleaned = numeric_noise().replace_all(s, "");
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => default,
    }
}

/// Coerce a JSON value to a trimmed, non-empty string
pub fn coerce_string(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse a timestamp from RFC 3339 / ISO-8601 text, a bare date, or an
/// epoch number (seconds or milliseconds). Unparsable input yields `None`.
pub fn coerce_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => epoch_to_datetime(n.as_f64()?),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Resolve a numeric field through its candidate list
pub fn number_field(record: &Value, candidates: &[&str], default: f64) -> f64 {
    coerce_number(first_present(record, candidates), default)
}

/// Resolve a string field through its candidate list
pub fn string_field(record: &Value, candidates: &[&str]) -> Option<String> {
    coerce_string(first_present(record, candidates))
}

/// Resolve a timestamp field through its candidate list
pub fn date_field(record: &Value, candidates: &[&str]) -> Option<DateTime<Utc>> {
    coerce_date(first_present(record, candidates))
}
