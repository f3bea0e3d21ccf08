//! Value kinds that the merge engine reconstructs instead of walking:
//! regular expressions, typed arrays, keyed maps and unique-value sets.

use super::semantics::same_value_zero;
use super::Value;
use regex_lite::{Regex, RegexBuilder};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// PatternError is returned when a [`RegExp`] cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("invalid regular expression flag '{flag}'")]
    InvalidFlag { flag: char },

    #[error("duplicate regular expression flag '{flag}'")]
    DuplicateFlag { flag: char },

    #[error("invalid regular expression /{pattern}/: {message}")]
    InvalidPattern { pattern: String, message: String },
}

const FLAG_ORDER: &str = "dgimsuvy";

/// RegExp is a pattern matcher: a source pattern, its flags and the
/// current match cursor.
#[derive(Clone)]
pub struct RegExp {
    source: String,
    flags: String,
    last_index: usize,
    compiled: Rc<Regex>,
}

impl RegExp {
    /// Compiles `source` with `flags` (any of `dgimsuvy`).
    pub fn new(source: &str, flags: &str) -> Result<RegExp, PatternError> {
        let mut normalized = String::new();
        for flag in flags.chars() {
            if !FLAG_ORDER.contains(flag) {
                return Err(PatternError::InvalidFlag { flag });
            }
            if normalized.contains(flag) {
                return Err(PatternError::DuplicateFlag { flag });
            }
            normalized.push(flag);
        }
        let flags: String = FLAG_ORDER.chars().filter(|f| normalized.contains(*f)).collect();
        let source = if source.is_empty() { "(?:)" } else { source };

        let compiled = RegexBuilder::new(source)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .map_err(|e| PatternError::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            })?;

        Ok(RegExp {
            source: source.to_string(),
            flags,
            last_index: 0,
            compiled: Rc::new(compiled),
        })
    }

    /// Returns a new matcher with the same source and flags and a reset
    /// cursor.
    pub fn duplicate(&self) -> RegExp {
        RegExp {
            source: self.source.clone(),
            flags: self.flags.clone(),
            last_index: 0,
            compiled: Rc::clone(&self.compiled),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn global(&self) -> bool {
        self.flags.contains('g')
    }

    pub fn ignore_case(&self) -> bool {
        self.flags.contains('i')
    }

    pub fn multiline(&self) -> bool {
        self.flags.contains('m')
    }

    pub fn sticky(&self) -> bool {
        self.flags.contains('y')
    }

    pub fn last_index(&self) -> usize {
        self.last_index
    }

    pub fn set_last_index(&mut self, last_index: usize) {
        self.last_index = last_index;
    }

    /// Tests `haystack` against the pattern.
    ///
    /// Global and sticky matchers start at and advance `last_index`; on a
    /// miss the cursor resets to 0.
    pub fn test(&mut self, haystack: &str) -> bool {
        if !(self.global() || self.sticky()) {
            return self.compiled.is_match(haystack);
        }
        let start = self.last_index;
        if start > haystack.len() || !haystack.is_char_boundary(start) {
            self.last_index = 0;
            return false;
        }
        match self.compiled.find_at(haystack, start) {
            Some(m) if !self.sticky() || m.start() == start => {
                self.last_index = m.end();
                true
            }
            _ => {
                self.last_index = 0;
                false
            }
        }
    }
}

impl PartialEq for RegExp {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.flags == other.flags
            && self.last_index == other.last_index
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

impl fmt::Debug for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// TypedArrayKind is the element type of a [`TypedArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
}

impl TypedArrayKind {
    /// Returns the class name, e.g. `Int8Array`.
    pub fn name(&self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Uint8Clamped => "Uint8ClampedArray",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
            TypedArrayKind::BigInt64 => "BigInt64Array",
            TypedArrayKind::BigUint64 => "BigUint64Array",
        }
    }
}

/// TypedArray is a fixed-width numeric array.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    BigInt64(Vec<i64>),
    BigUint64(Vec<u64>),
}

impl TypedArray {
    pub fn kind(&self) -> TypedArrayKind {
        match self {
            TypedArray::Int8(_) => TypedArrayKind::Int8,
            TypedArray::Uint8(_) => TypedArrayKind::Uint8,
            TypedArray::Uint8Clamped(_) => TypedArrayKind::Uint8Clamped,
            TypedArray::Int16(_) => TypedArrayKind::Int16,
            TypedArray::Uint16(_) => TypedArrayKind::Uint16,
            TypedArray::Int32(_) => TypedArrayKind::Int32,
            TypedArray::Uint32(_) => TypedArrayKind::Uint32,
            TypedArray::Float32(_) => TypedArrayKind::Float32,
            TypedArray::Float64(_) => TypedArrayKind::Float64,
            TypedArray::BigInt64(_) => TypedArrayKind::BigInt64,
            TypedArray::BigUint64(_) => TypedArrayKind::BigUint64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Uint16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
            TypedArray::BigInt64(v) => v.len(),
            TypedArray::BigUint64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index` as a `Number` or `BigInt` value.
    pub fn get(&self, index: usize) -> Option<Value> {
        let value = match self {
            TypedArray::Int8(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => {
                Value::Number(f64::from(*v.get(index)?))
            }
            TypedArray::Int16(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Uint16(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Int32(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Uint32(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Float32(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Float64(v) => Value::Number(*v.get(index)?),
            TypedArray::BigInt64(v) => Value::BigInt(i128::from(*v.get(index)?)),
            TypedArray::BigUint64(v) => Value::BigInt(i128::from(*v.get(index)?)),
        };
        Some(value)
    }

    /// Returns every element as a value.
    pub fn to_values(&self) -> Vec<Value> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }
}

/// KeyedMap is an insertion-ordered key/value map whose keys may be any
/// value, compared with SameValueZero.
#[derive(Clone, Default)]
pub struct KeyedMap {
    entries: Vec<(Value, Value)>,
}

impl KeyedMap {
    pub fn new() -> Self {
        KeyedMap::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries.iter().position(|(k, _)| same_value_zero(k, key))
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.position(key).map(|pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    /// Inserts or replaces the value for `key`; replaced keys keep their
    /// position.
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.position(&key) {
            Some(pos) => self.entries[pos].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let pos = self.position(key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(Value, Value)> for KeyedMap {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        let mut map = KeyedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl PartialEq for KeyedMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

/// ValueSet is an insertion-ordered set of unique values (SameValueZero).
#[derive(Clone, Default)]
pub struct ValueSet {
    items: Vec<Value>,
}

impl ValueSet {
    pub fn new() -> Self {
        ValueSet::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.iter().any(|item| same_value_zero(item, value))
    }

    /// Inserts `value`, returning false if it was already present.
    pub fn insert(&mut self, value: Value) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    pub fn remove(&mut self, value: &Value) -> bool {
        match self.items.iter().position(|item| same_value_zero(item, value)) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    /// Returns a new set with the elements of `self` followed by the
    /// elements of `other` not already present.
    pub fn union(&self, other: &ValueSet) -> ValueSet {
        let mut result = self.clone();
        for item in other.iter() {
            result.insert(item.clone());
        }
        result
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut set = ValueSet::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|item| other.contains(item) || other.iter().any(|o| o == item))
    }
}
