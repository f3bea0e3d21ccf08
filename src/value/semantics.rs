//! Equality relations and truthiness of dynamic values.
//!
//! - [`strict_equals`]: identity for shared kinds, value equality for
//!   primitives; NaN is never equal to itself.
//! - [`same_value_zero`]: like strict equality but NaN equals NaN. Used for
//!   map keys and set members.
//! - [`loose_equals`]: equality with primitive coercions (numeric strings,
//!   booleans, big integers, `null == undefined`).

use super::Value;

/// Identity or primitive equality.
///
/// Owned special kinds (dates, patterns, buffers, maps, sets) have no
/// identity to share, so two of them are never strictly equal.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x.ptr_eq(y),
        (Value::Array(x), Value::Array(y)) => x.ptr_eq(y),
        (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        (Value::Error(x), Value::Error(y)) => x.ptr_eq(y),
        _ => false,
    }
}

/// Strict equality where NaN equals NaN.
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_nan() && y.is_nan() => true,
        _ => strict_equals(a, b),
    }
}

/// Equality with primitive coercion.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        _ if a.is_nullish() || b.is_nullish() => a.is_nullish() && b.is_nullish(),
        (Value::Number(x), Value::String(s)) | (Value::String(s), Value::Number(x)) => {
            *x == string_to_number(s)
        }
        (Value::BigInt(n), Value::Number(x)) | (Value::Number(x), Value::BigInt(n)) => {
            bigint_equals_number(*n, *x)
        }
        (Value::BigInt(n), Value::String(s)) | (Value::String(s), Value::BigInt(n)) => {
            string_to_bigint(s) == Some(*n)
        }
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) if !other.is_bool() => {
            loose_equals(&Value::Number(if *flag { 1.0 } else { 0.0 }), other)
        }
        _ => strict_equals(a, b),
    }
}

/// Returns false for `undefined`, `null`, `false`, `0`, `NaN`, `""` and `0n`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::BigInt(n) => *n != 0,
        _ => true,
    }
}

/// Converts text to a number the way numeric coercion does: surrounding
/// whitespace is ignored, the empty string is 0, `0x`/`0o`/`0b` prefixes
/// are honored and anything unparseable is NaN.
pub fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }
    let numeric = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn string_to_bigint(text: &str) -> Option<i128> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<i128>().ok()
}

fn bigint_equals_number(n: i128, x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0 && (n as f64) == x && (x as i128) == n
}
