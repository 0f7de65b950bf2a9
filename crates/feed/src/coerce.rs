//! Tolerant JSON shape coercion.
//!
//! The feed answers the same endpoint as a bare array, a `{results: [...]}`
//! page, or an object keyed by the collection name, depending on the
//! deployment. Display data favors degradation over failure, so these
//! helpers flatten all of that into plain vectors and default the rest.

use rust_decimal::Decimal;
use serde_json::Value;

/// Extracts the row array from whatever wrapper the feed used.
///
/// Tries, in order: the value itself, `value[key]`, `value.results`,
/// `value.data`. Anything else yields an empty vector.
#[must_use]
pub fn coerce_array(value: &Value, key: Option<&str>) -> Vec<Value> {
    if let Some(items) = value.as_array() {
        return items.clone();
    }
    if let Some(key) = key {
        if let Some(items) = value.get(key).and_then(Value::as_array) {
            return items.clone();
        }
    }
    for fallback in ["results", "data"] {
        if let Some(items) = value.get(fallback).and_then(Value::as_array) {
            return items.clone();
        }
    }
    Vec::new()
}

/// Reads a numeric field, walking a fallback chain of names; 0 when none
/// decodes. Numbers may arrive as JSON numbers or numeric strings.
#[must_use]
pub fn decimal_field(row: &Value, names: &[&str]) -> Decimal {
    for name in names {
        let Some(raw) = row.get(name) else { continue };
        if let Some(parsed) = decimal_value(raw) {
            return parsed;
        }
    }
    Decimal::ZERO
}

fn decimal_value(raw: &Value) -> Option<Decimal> {
    match raw {
        Value::Number(_) => serde_json::from_value(raw.clone()).ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads an option label that may be a bare string or an object carrying
/// one of the usual name fields.
#[must_use]
pub fn option_label(raw: &Value) -> Option<String> {
    if let Some(s) = raw.as_str() {
        return Some(s.to_string());
    }
    for field in ["nombre", "unidad", "label"] {
        if let Some(s) = raw.get(field).and_then(Value::as_str) {
            return Some(s.to_string());
        }
    }
    None
}
