//! Core value types and the type classifier.

use super::callable::{ErrorValue, Function, Symbol};
use super::object::{Array, Object};
use super::special::{KeyedMap, RegExp, TypedArray, TypedArrayKind, ValueSet};
use chrono::{DateTime, Utc};
use std::fmt;

/// Value is a dynamically typed tree node.
///
/// `Array`, `Object`, `Function` and `Error` are shared references: cloning
/// the value clones the handle, so structures may share subtrees or even
/// contain themselves. Every other variant is owned and cloning copies it.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent marker: "nothing here, ignore this slot".
    #[default]
    Undefined,
    /// The empty marker.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    BigInt(i128),
    Symbol(Symbol),
    Array(Array),
    Object(Object),
    Function(Function),
    Error(ErrorValue),
    Date(DateTime<Utc>),
    RegExp(RegExp),
    Buffer(Vec<u8>),
    TypedArray(TypedArray),
    ArrayBuffer(Vec<u8>),
    Map(KeyedMap),
    Set(ValueSet),
}

/// Kind is the semantic classification of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Undefined,
    Null,
    /// Booleans, numbers and strings.
    Primitive,
    BigInt,
    Symbol,
    Array,
    PlainObject,
    Function,
    Date,
    RegExp,
    Buffer,
    TypedArray(TypedArrayKind),
    ArrayBuffer,
    Map,
    Set,
    Error,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Undefined => "Undefined",
            Kind::Null => "Null",
            Kind::Primitive => "Primitive",
            Kind::BigInt => "BigInt",
            Kind::Symbol => "Symbol",
            Kind::Array => "Array",
            Kind::PlainObject => "Object",
            Kind::Function => "Function",
            Kind::Date => "Date",
            Kind::RegExp => "RegExp",
            Kind::Buffer => "Buffer",
            Kind::TypedArray(kind) => kind.name(),
            Kind::ArrayBuffer => "ArrayBuffer",
            Kind::Map => "Map",
            Kind::Set => "Set",
            Kind::Error => "Error",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Classifies the value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Null => Kind::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Kind::Primitive,
            Value::BigInt(_) => Kind::BigInt,
            Value::Symbol(_) => Kind::Symbol,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::PlainObject,
            Value::Function(_) => Kind::Function,
            Value::Error(_) => Kind::Error,
            Value::Date(_) => Kind::Date,
            Value::RegExp(_) => Kind::RegExp,
            Value::Buffer(_) => Kind::Buffer,
            Value::TypedArray(t) => Kind::TypedArray(t.kind()),
            Value::ArrayBuffer(_) => Kind::ArrayBuffer,
            Value::Map(_) => Kind::Map,
            Value::Set(_) => Kind::Set,
        }
    }

    /// Creates an object value from enumerable key/value pairs.
    pub fn object<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(Object::from_entries(entries))
    }

    /// Creates an array value.
    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::Array(items.into_iter().collect())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for `Null` and `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_bigint(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_plain_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    pub fn is_regexp(&self) -> bool {
        matches!(self, Value::RegExp(_))
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self, Value::Buffer(_))
    }

    pub fn is_typed_array(&self) -> bool {
        matches!(self, Value::TypedArray(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Returns true for non-null composites: arrays, objects and every
    /// special kind. Functions are not objects in this sense.
    pub fn is_object(&self) -> bool {
        !matches!(
            self,
            Value::Undefined
                | Value::Null
                | Value::Bool(_)
                | Value::Number(_)
                | Value::String(_)
                | Value::BigInt(_)
                | Value::Symbol(_)
                | Value::Function(_)
        )
    }

    /// Returns the truthiness of the value.
    pub fn is_truthy(&self) -> bool {
        super::semantics::is_truthy(self)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_regexp(&self) -> Option<&RegExp> {
        match self {
            Value::RegExp(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&KeyedMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the identity of a shared value, `None` for owned kinds.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(a) => Some(a.id()),
            Value::Object(o) => Some(o.id()),
            Value::Function(f) => Some(f.id()),
            Value::Error(e) => Some(e.id()),
            _ => None,
        }
    }

    /// Returns the enumerable own properties as `(key, value)` pairs:
    /// object and error properties, array and binary indices, and the
    /// UTF-16 units of a string. Dates, patterns, array buffers, maps, sets
    /// and the other primitives have none.
    pub fn own_enumerable_entries(&self) -> Vec<(String, Value)> {
        match self {
            Value::Object(o) => o.entries(),
            Value::Error(e) => e.properties().entries(),
            Value::Function(f) => f.attributes().entries(),
            Value::Array(a) => indexed(a.to_vec()),
            Value::Buffer(b) => indexed(b.iter().map(|byte| Value::Number(f64::from(*byte)))),
            Value::TypedArray(t) => indexed(t.to_values()),
            Value::String(s) => indexed(
                s.encode_utf16()
                    .map(|unit| Value::String(String::from_utf16_lossy(&[unit]))),
            ),
            _ => Vec::new(),
        }
    }
}

fn indexed<I: IntoIterator<Item = Value>>(items: I) -> Vec<(String, Value)> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i.to_string(), v))
        .collect()
}

/// Structural equality without coercion.
///
/// Shared kinds are equal when they are the same reference or hold equal
/// contents; objects compare their enumerable properties regardless of
/// order; functions and symbols compare by identity. NaN equals NaN. Use
/// [`crate::deep_equal`] for the coercing comparison.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::RegExp(a), Value::RegExp(b)) => a == b,
            (Value::Buffer(a), Value::Buffer(b)) => a == b,
            (Value::TypedArray(a), Value::TypedArray(b)) => a == b,
            (Value::ArrayBuffer(a), Value::ArrayBuffer(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::from_vec(items))
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<ErrorValue> for Value {
    fn from(error: ErrorValue) -> Self {
        Value::Error(error)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Value::Date(date)
    }
}

impl From<RegExp> for Value {
    fn from(re: RegExp) -> Self {
        Value::RegExp(re)
    }
}

impl From<TypedArray> for Value {
    fn from(array: TypedArray) -> Self {
        Value::TypedArray(array)
    }
}

impl From<KeyedMap> for Value {
    fn from(map: KeyedMap) -> Self {
        Value::Map(map)
    }
}

impl From<ValueSet> for Value {
    fn from(set: ValueSet) -> Self {
        Value::Set(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::Undefined.kind(), Kind::Undefined);
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::from(true).kind(), Kind::Primitive);
        assert_eq!(Value::from(3.14).kind(), Kind::Primitive);
        assert_eq!(Value::from("hello").kind(), Kind::Primitive);
        assert_eq!(Value::BigInt(1).kind(), Kind::BigInt);
        assert_eq!(Value::Symbol(Symbol::new(None)).kind(), Kind::Symbol);
        assert_eq!(Value::array([]).kind(), Kind::Array);
        assert_eq!(Value::object::<&str, _>([]).kind(), Kind::PlainObject);
        assert_eq!(
            Value::Function(Function::new("f", |_| Value::Undefined)).kind(),
            Kind::Function
        );
        assert_eq!(Value::Error(ErrorValue::new("x")).kind(), Kind::Error);
        assert_eq!(Value::Date(Utc::now()).kind(), Kind::Date);
        assert_eq!(Value::Buffer(vec![]).kind(), Kind::Buffer);
        assert_eq!(Value::ArrayBuffer(vec![]).kind(), Kind::ArrayBuffer);
        assert_eq!(
            Value::TypedArray(TypedArray::Float32(vec![])).kind(),
            Kind::TypedArray(TypedArrayKind::Float32)
        );
        assert_eq!(Value::Map(KeyedMap::new()).kind(), Kind::Map);
        assert_eq!(Value::Set(ValueSet::new()).kind(), Kind::Set);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::PlainObject.to_string(), "Object");
        assert_eq!(
            Kind::TypedArray(TypedArrayKind::Uint8Clamped).to_string(),
            "Uint8ClampedArray"
        );
    }

    #[test]
    fn test_is_object() {
        assert!(Value::array([]).is_object());
        assert!(Value::Map(KeyedMap::new()).is_object());
        assert!(Value::Date(Utc::now()).is_object());
        assert!(!Value::Null.is_object());
        assert!(!Value::from("x").is_object());
        assert!(!Value::Function(Function::new("f", |_| Value::Null)).is_object());
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Null, Value::Undefined);
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));

        let a = Value::object([("x", Value::from(1)), ("y", Value::from(2))]);
        let b = Value::object([("y", Value::from(2)), ("x", Value::from(1))]);
        assert_eq!(a, b);
        assert_ne!(a, Value::object([("x", Value::from(1))]));
    }

    #[test]
    fn test_identity() {
        let object = Object::new();
        let a = Value::Object(object.clone());
        let b = Value::Object(object);
        assert_eq!(a.identity(), b.identity());
        assert!(a.identity().is_some());
        assert_eq!(Value::Date(Utc::now()).identity(), None);
    }

    #[test]
    fn test_own_enumerable_entries() {
        let array = Value::array([Value::from("a"), Value::from("b")]);
        assert_eq!(array.own_enumerable_entries(), vec![
            ("0".to_string(), Value::from("a")),
            ("1".to_string(), Value::from("b")),
        ]);
        assert!(Value::Map(KeyedMap::new()).own_enumerable_entries().is_empty());
        assert!(Value::Error(ErrorValue::new("x")).own_enumerable_entries().is_empty());
        assert_eq!(Value::from("ab").own_enumerable_entries(), vec![
            ("0".to_string(), Value::from("a")),
            ("1".to_string(), Value::from("b")),
        ]);
        assert!(Value::from(7).own_enumerable_entries().is_empty());
    }
}
