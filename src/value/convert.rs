//! Conversion between values and serde data formats.
//!
//! Deserialization yields the JSON subset of [`Value`] (null, booleans,
//! numbers, strings, arrays and objects) and keeps object keys in document
//! order. Serialization maps the remaining kinds onto JSON shapes:
//!
//! - dates become RFC 3339 strings and patterns `/source/flags` strings;
//! - buffers become `{"type": "Buffer", "data": [...]}`, typed arrays and
//!   array buffers plain number arrays;
//! - maps become arrays of `[key, value]` pairs, sets arrays of members;
//! - errors become objects with `name`, `message` and their enumerable
//!   properties;
//! - `undefined`, functions and symbols become `null` inside arrays and are
//!   skipped as object properties;
//! - non-finite numbers become `null`.
//!
//! Serializing a circular structure fails instead of recursing forever.

use super::callable::ErrorValue;
use super::object::{Array, Object};
use super::Value;
use chrono::SecondsFormat;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::cell::RefCell;
use std::fmt;

struct Node<'a> {
    value: &'a Value,
    ancestors: &'a RefCell<Vec<usize>>,
}

impl<'a> Node<'a> {
    fn child(&self, value: &'a Value) -> Node<'a> {
        Node {
            value,
            ancestors: self.ancestors,
        }
    }
}

/// Returns true for values that serialize to nothing as object properties.
fn is_skipped_property(value: &Value) -> bool {
    matches!(value, Value::Undefined | Value::Function(_) | Value::Symbol(_))
}

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let identity = self.value.identity();
        if let Some(id) = identity {
            if self.ancestors.borrow().contains(&id) {
                return Err(S::Error::custom("can not serialize circular structures"));
            }
            self.ancestors.borrow_mut().push(id);
        }
        let result = self.serialize_value(serializer);
        if identity.is_some() {
            self.ancestors.borrow_mut().pop();
        }
        result
    }
}

impl Node<'_> {
    fn serialize_value<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Undefined | Value::Null | Value::Function(_) | Value::Symbol(_) => {
                serializer.serialize_unit()
            }
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::BigInt(n) => serializer.serialize_i128(*n),
            Value::Array(array) => self.serialize_array(array, serializer),
            Value::Object(object) => self.serialize_object(object, None, serializer),
            Value::Error(error) => self.serialize_object(error.properties(), Some(error), serializer),
            Value::Date(date) => {
                serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::RegExp(re) => serializer.collect_str(re),
            Value::Buffer(bytes) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "Buffer")?;
                map.serialize_entry("data", bytes)?;
                map.end()
            }
            Value::ArrayBuffer(bytes) => serializer.collect_seq(bytes),
            Value::TypedArray(typed) => {
                let items = typed.to_values();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in &items {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut seq = serializer.serialize_seq(Some(map.len()))?;
                for (key, value) in map.iter() {
                    seq.serialize_element(&(self.child(key), self.child(value)))?;
                }
                seq.end()
            }
            Value::Set(set) => {
                let mut seq = serializer.serialize_seq(Some(set.len()))?;
                for item in set.iter() {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
        }
    }

    fn serialize_array<S: Serializer>(&self, array: &Array, serializer: S) -> Result<S::Ok, S::Error> {
        let items = array.to_vec();
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in &items {
            seq.serialize_element(&self.child(item))?;
        }
        seq.end()
    }

    fn serialize_object<S: Serializer>(
        &self,
        object: &Object,
        error: Option<&ErrorValue>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let entries: Vec<(String, Value)> = object
            .entries()
            .into_iter()
            .filter(|(_, v)| !is_skipped_property(v))
            .collect();
        let mut map = serializer.serialize_map(None)?;
        if let Some(error) = error {
            map.serialize_entry("name", error.name())?;
            map.serialize_entry("message", &error.message())?;
        }
        for (key, value) in &entries {
            map.serialize_entry(key, &self.child(value))?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let ancestors = RefCell::new(Vec::new());
        Node {
            value: self,
            ancestors: &ancestors,
        }
        .serialize(serializer)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON-compatible value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let array = Array::new();
        while let Some(item) = seq.next_element::<Value>()? {
            array.push(item);
        }
        Ok(Value::Array(array))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let object = Object::new();
        while let Some((key, value)) = map.next_entry::<Value, Value>()? {
            object.set(property_key(&key), value);
        }
        Ok(Value::Object(object))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Converts a value used as a key into a property name.
pub fn property_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => super::display::format_number(*n),
        Value::BigInt(n) => n.to_string(),
        other => other.to_string(),
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from_serde_json(&json)
    }
}

impl Value {
    /// Converts a `serde_json::Value` into a value.
    pub fn from_serde_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Array(items.iter().map(Value::from_serde_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(Object::from_entries(
                map.iter().map(|(k, v)| (k.clone(), Value::from_serde_json(v))),
            )),
        }
    }

    /// Converts the value into a `serde_json::Value`.
    pub fn to_serde_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Parse a value from JSON.
pub fn from_json(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a value to JSON.
pub fn to_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Parse a value from YAML.
pub fn from_yaml(yaml: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Serialize a value to YAML.
pub fn to_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{KeyedMap, RegExp, ValueSet};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_json_roundtrip_keeps_key_order() {
        let value = from_json(r#"{"z": 1, "a": [true, null, "s"], "m": {"k": 2.5}}"#).unwrap();
        assert_eq!(
            value.as_object().unwrap().keys(),
            vec!["z".to_string(), "a".to_string(), "m".to_string()]
        );
        assert_eq!(
            to_json(&value).unwrap(),
            r#"{"z":1,"a":[true,null,"s"],"m":{"k":2.5}}"#
        );
    }

    #[test]
    fn test_yaml_parse() {
        let value = from_yaml("name: test\ncount: 42\ntags: [a, b]\n").unwrap();
        let expected = Value::from(json!({"name": "test", "count": 42, "tags": ["a", "b"]}));
        assert_eq!(value, expected);
    }

    #[test]
    fn test_yaml_non_string_keys() {
        let value = from_yaml("1: one\ntrue: yes\n").unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.get("1"), Some(Value::from("one")));
        assert_eq!(object.get("true"), Some(Value::from("yes")));
    }

    #[test]
    fn test_serialize_special_kinds() {
        let date = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let map: KeyedMap = [(Value::from("a"), Value::from(1))].into_iter().collect();
        let set: ValueSet = [Value::from(1), Value::from(2)].into_iter().collect();
        let value = Value::object([
            ("date", Value::Date(date)),
            ("re", Value::RegExp(RegExp::new("a.c", "g").unwrap())),
            ("buf", Value::Buffer(vec![1, 2])),
            ("map", Value::Map(map)),
            ("set", Value::Set(set)),
            ("skip", Value::Undefined),
            ("nan", Value::Number(f64::NAN)),
        ]);
        assert_eq!(
            value.to_serde_json().unwrap(),
            json!({
                "date": "2025-01-01T12:00:00.000Z",
                "re": "/a.c/g",
                "buf": {"type": "Buffer", "data": [1, 2]},
                "map": [["a", 1]],
                "set": [1, 2],
                "nan": null,
            })
        );
    }

    #[test]
    fn test_serialize_error() {
        let error = ErrorValue::new("boom");
        error.properties().set("code", Value::from(7));
        assert_eq!(
            Value::Error(error).to_serde_json().unwrap(),
            json!({"name": "Error", "message": "boom", "code": 7})
        );
    }

    #[test]
    fn test_serialize_circular_fails() {
        let object = Object::new();
        object.set("self", Value::Object(object.clone()));
        let err = to_json(&Value::Object(object)).unwrap_err();
        assert!(err.to_string().contains("circular"));
    }

    #[test]
    fn test_serialize_shared_subtree() {
        let shared = Value::object([("x", Value::from(1))]);
        let value = Value::array([shared.clone(), shared]);
        assert_eq!(to_json(&value).unwrap(), r#"[{"x":1},{"x":1}]"#);
    }
}
