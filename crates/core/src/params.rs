//! Pure helper functions for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! These never fail — they always produce a usable value. Validation happens
//! later, when the resulting config is handed to a field or track.

use crate::field::Range;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `[min, max]` pair from `params[name]` as a [`Range`],
/// returning `default` if missing or malformed.
pub fn param_range(params: &Value, name: &str, default: Range) -> Range {
    params
        .get(name)
        .and_then(Value::as_array)
        .and_then(|a| match a.as_slice() {
            [min, max] => Some(Range::new(min.as_f64()?, max.as_f64()?)),
            _ => None,
        })
        .unwrap_or(default)
}
