use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;

/// One raw row as fetched from the row store: column name to JSON value.
pub type RawRow = HashMap<String, Value>;

/// Coerces a value into a non-empty trimmed string.
pub fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerces a value into a `Decimal`.
///
/// Accepts native JSON numbers (non-finite floats rejected) and strings
/// with either `.` or `,` as the decimal separator.
pub fn coerce_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => {
            let f = n.as_f64()?;
            if !f.is_finite() {
                return None;
            }
            Decimal::from_f64(f)
        }
        Value::String(s) => {
            let cleaned = s.trim().replace(',', ".").replace(' ', "");
            if cleaned.is_empty() {
                return None;
            }
            Decimal::from_str_exact(&cleaned)
                .or_else(|_| Decimal::from_scientific(&cleaned))
                .ok()
        }
        _ => None,
    }
}

/// Coerces a value into an `f64`, rejecting non-finite results.
pub fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Coerces a value into a bool. String forms are matched case-insensitively.
pub fn coerce_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerces a value into an RFC 3339 timestamp.
pub fn coerce_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = coerce_string(value)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Coerces a geographic coverage value into a country-to-weight map.
///
/// Accepts a native JSON object or a JSON-ish string. The sheet backend
/// historically emitted Python dict literals with single quotes, so those
/// are normalized to double quotes before parsing. Malformed JSON yields
/// no coverage, not an error.
pub fn coerce_coverage(value: Option<&Value>) -> Option<HashMap<String, Decimal>> {
    let object = match value? {
        Value::Object(map) => map.clone(),
        Value::String(s) if s.contains('{') => {
            let normalized = s.replace('\'', "\"");
            match serde_json::from_str::<Value>(&normalized) {
                Ok(Value::Object(map)) => map,
                _ => return None,
            }
        }
        _ => return None,
    };

    let mut coverage = HashMap::new();
    for (country, weight) in &object {
        if let Some(w) = coerce_decimal(Some(weight)) {
            coverage.insert(country.trim().to_uppercase(), w);
        }
    }

    if coverage.is_empty() {
        None
    } else {
        Some(coverage)
    }
}
