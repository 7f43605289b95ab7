//! JSON payload location and record mapping.

use serde_json::{Map, Value};

use carpark_core::RawRecord;

use super::fields::first_present;

/// Keys that may hold the record array when the payload is an object,
/// in priority order.
const CONTAINER_KEYS: [&str; 6] = ["data", "results", "items", "carParks", "CarParks", "Result"];

const NAME_FIELDS: [&str; 2] = ["carParkName", "name"];
const OPTION_FIELDS: [&str; 2] = ["category", "parkingOption"];
const AVAILABLE_FIELDS: [&str; 2] = ["availableSpaces", "available"];

/// Locate a JSON value in `body`.
///
/// Tries the whole (trimmed) body when it looks like JSON, then the span from
/// the first `{` to the last `}`, then the span from the first `[` to the
/// last `]`.
pub(super) fn parse_json_payload(body: &str) -> Option<Value> {
    let trimmed = body.trim();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return Some(value);
        }
    }

    if let Some(span) = enclosed_span(trimmed, '{', '}') {
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(span) {
            return Some(value);
        }
    }

    if let Some(span) = enclosed_span(trimmed, '[', ']') {
        if let Ok(value @ Value::Array(_)) = serde_json::from_str::<Value>(span) {
            return Some(value);
        }
    }

    None
}

/// Slice from the first `open` through the last `close`, inclusive.
fn enclosed_span(s: &str, open: char, close: char) -> Option<&str> {
    let start = s.find(open)?;
    let end = s.rfind(close)?;
    (end > start).then(|| &s[start..=end])
}

/// Map a located payload onto raw records.
///
/// An array is taken as the record list itself; an object must carry the
/// list under one of [`CONTAINER_KEYS`].
pub(super) fn records_from_json(payload: &Value) -> Vec<RawRecord> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => {
            match CONTAINER_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_array))
            {
                Some(items) => items,
                None => return Vec::new(),
            }
        }
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(obj) => Some(record_from_object(obj)),
            other => {
                tracing::debug!(item = %other, "skipping non-object JSON record");
                None
            }
        })
        .collect()
}

fn record_from_object(obj: &Map<String, Value>) -> RawRecord {
    let present = |key: &str| obj.get(key).filter(|v| is_present(v));

    RawRecord {
        carpark: first_present(&NAME_FIELDS, present)
            .map(as_text)
            .unwrap_or_default(),
        parking_option: first_present(&OPTION_FIELDS, present)
            .map(as_text)
            .unwrap_or_default(),
        available_spaces: first_present(&AVAILABLE_FIELDS, present).and_then(as_count),
    }
}

/// Null and empty strings count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Integer space count from a JSON number or numeric string.
///
/// Fractional and negative values are rejected rather than truncated or
/// passed through.
#[allow(clippy::cast_possible_truncation)]
fn as_count(value: &Value) -> Option<i64> {
    let count = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    count.filter(|c| *c >= 0)
}
