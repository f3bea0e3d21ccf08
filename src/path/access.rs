//! Path-driven reads and writes.

use super::parser::{IntoKeys, IntoProps};
use crate::merge::{clone, MergeError};
use crate::value::{array_index, Object, Value};

/// Returns the value at `path` inside `obj`.
///
/// Each key must be an own property of the value reached so far; the walk
/// stops with `None` at the first missing key or falsy intermediate. An
/// empty path also yields `None`. Falsy values found at the end of the
/// path (`0`, `""`, `Null`) are returned as they are.
///
/// ```
/// use deep_merge::{get, value::from_json, Value};
///
/// let obj = from_json(r#"{"test": {"test": 0}}"#).unwrap();
/// assert_eq!(get(&obj, "test.test"), Some(Value::from(0)));
/// assert_eq!(get(&obj, "there.is.no.such.prop"), None);
/// ```
pub fn get(obj: &Value, path: impl IntoKeys) -> Option<Value> {
    let keys = path.into_keys();
    if keys.is_empty() {
        return None;
    }
    let mut current = obj.clone();
    for key in &keys {
        if !current.is_truthy() {
            return None;
        }
        current = own_property(&current, key)?;
    }
    Some(current)
}

/// Like [`get`], returning `default` when nothing is found.
pub fn get_or(obj: &Value, path: impl IntoKeys, default: Value) -> Value {
    get(obj, path).unwrap_or(default)
}

/// Writes `value` at `path` inside `obj` and returns `obj`.
///
/// Intermediate keys that are missing or falsy are replaced by empty
/// mappings. A `Null` value deletes the last key instead; deleting a
/// sequence position leaves an `Undefined` hole. The walk stops without
/// writing when it reaches a truthy value that cannot hold properties, or
/// a sequence position too far past its end to pad.
///
/// Returns `None` when the path is empty. When `obj` itself is falsy the
/// write goes to a discarded mapping and `obj` is returned unchanged.
pub fn set(obj: &Value, path: impl IntoKeys, value: Value) -> Option<Value> {
    let mut keys = path.into_keys();
    let last = keys.pop()?;

    let mut current = if obj.is_truthy() {
        obj.clone()
    } else {
        Value::Object(Object::new())
    };
    for key in &keys {
        let present = own_property(&current, key).is_some_and(|v| v.is_truthy());
        if !present && !write_property(&current, key, Value::Object(Object::new())) {
            return Some(obj.clone());
        }
        match own_property(&current, key) {
            Some(next) => current = next,
            None => return Some(obj.clone()),
        }
    }

    if value.is_null() {
        delete_property(&current, &last);
    } else {
        write_property(&current, &last, value);
    }
    Some(obj.clone())
}

/// Returns a new mapping holding copies of the values at `props`.
///
/// Paths that are missing or hold a nullish value are skipped. Returns
/// `Undefined` when `obj` is not a non-null composite.
///
/// ```
/// use deep_merge::{pick, value::from_json};
///
/// let obj = from_json(r#"{"a": {"a": 1, "b": 2}, "c": {"c": 3, "d": 4}, "e": 5}"#).unwrap();
/// let picked = pick(&obj, "a.b, c.d").unwrap();
/// assert_eq!(picked, from_json(r#"{"a": {"b": 2}, "c": {"d": 4}}"#).unwrap());
/// ```
pub fn pick(obj: &Value, props: impl IntoProps) -> Result<Value, MergeError> {
    if !obj.is_object() {
        return Ok(Value::Undefined);
    }
    let out = Value::Object(Object::new());
    for prop in props.into_props() {
        match get(obj, prop.as_str()) {
            Some(found) if !found.is_nullish() => {
                set(&out, prop.as_str(), clone(&found)?);
            }
            _ => {}
        }
    }
    Ok(out)
}

/// Returns a copy of `obj` without the values at `props`.
///
/// Only paths whose current value is truthy are removed. Returns
/// `Undefined` when `obj` is not a non-null composite.
pub fn omit(obj: &Value, props: impl IntoProps) -> Result<Value, MergeError> {
    if !obj.is_object() {
        return Ok(Value::Undefined);
    }
    let out = clone(obj)?;
    for prop in props.into_props() {
        if get(obj, prop.as_str()).is_some_and(|found| found.is_truthy()) {
            set(&out, prop.as_str(), Value::Null);
        }
    }
    Ok(out)
}

/// Looks up an own property, enumerable or not.
fn own_property(value: &Value, key: &str) -> Option<Value> {
    match value {
        Value::Object(object) => object.get(key),
        Value::Function(function) => function.attributes().get(key),
        Value::Error(error) => error.properties().get(key),
        Value::Array(array) if key == "length" => Some(Value::from(array.len())),
        Value::Array(array) => array.get(array_index(key)?),
        Value::String(s) if key == "length" => Some(Value::from(s.encode_utf16().count())),
        Value::String(s) => {
            let unit = s.encode_utf16().nth(array_index(key)?)?;
            Some(Value::String(String::from_utf16_lossy(&[unit])))
        }
        Value::Buffer(bytes) => {
            let byte = bytes.get(array_index(key)?)?;
            Some(Value::Number(f64::from(*byte)))
        }
        Value::TypedArray(array) => array.get(array_index(key)?),
        _ => None,
    }
}

/// Assigns an own property. Returns false when `target` cannot hold it.
fn write_property(target: &Value, key: &str, value: Value) -> bool {
    match target {
        Value::Object(object) => object.set(key, value),
        Value::Function(function) => function.attributes().set(key, value),
        Value::Error(error) => error.properties().set(key, value),
        Value::Array(array) => {
            return array_index(key).is_some_and(|index| array.set(index, value));
        }
        _ => return false,
    }
    true
}

fn delete_property(target: &Value, key: &str) {
    match target {
        Value::Object(object) => {
            object.remove(key);
        }
        Value::Function(function) => {
            function.attributes().remove(key);
        }
        Value::Error(error) => {
            error.properties().remove(key);
        }
        Value::Array(array) => {
            if let Some(index) = array_index(key).filter(|i| *i < array.len()) {
                array.set(index, Value::Undefined);
            }
        }
        _ => {}
    }
}
