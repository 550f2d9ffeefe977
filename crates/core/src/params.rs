//! Lenient typed lookups into a JSON parameter object.
//!
//! Every helper takes the object, a key and a fallback. A missing key, a
//! `null`, or a value of the wrong JSON type yields the fallback, so callers
//! can always build a complete [`Config`](crate::config::Config) from partial
//! input and leave range checks to validation.

use crate::seed::Seed;
use serde_json::Value;

/// Reads a number. Integers are widened to `f64`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads a non-negative integer. Floats and negative numbers fall back.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Reads a signed integer. Whole-valued floats such as `2.0` are accepted.
pub fn param_i64(params: &Value, name: &str, default: i64) -> i64 {
    params.get(name).and_then(as_whole).unwrap_or(default)
}

pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Reads an array of signed integers.
///
/// The whole array falls back if any element is not a whole number.
pub fn param_i64_list(params: &Value, name: &str, default: &[i64]) -> Vec<i64> {
    params
        .get(name)
        .and_then(Value::as_array)
        .and_then(|items| items.iter().map(as_whole).collect::<Option<Vec<_>>>())
        .unwrap_or_else(|| default.to_vec())
}

/// Reads a seed, which may be given as text or as a number.
pub fn param_seed(params: &Value, name: &str) -> Option<Seed> {
    match params.get(name)? {
        Value::String(s) => Some(Seed::Text(s.clone())),
        Value::Number(n) => n.as_f64().map(Seed::Number),
        _ => None,
    }
}

fn as_whole(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}
