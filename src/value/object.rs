//! Shared, mutable composites: keyed objects and arrays.

use super::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Property is a single own property of an [`Object`].
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub value: Value,
    /// Non-enumerable properties are skipped by merge, equality and
    /// serialization but remain readable through path lookups.
    pub enumerable: bool,
}

impl Property {
    /// Creates a new enumerable property.
    pub fn new(value: Value) -> Self {
        Property {
            value,
            enumerable: true,
        }
    }

    /// Creates a new non-enumerable property.
    pub fn hidden(value: Value) -> Self {
        Property {
            value,
            enumerable: false,
        }
    }
}

#[derive(Default)]
struct Properties {
    entries: Vec<(String, Property)>,
    index: HashMap<String, usize>,
}

impl Properties {
    fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    fn define(&mut self, key: String, property: Property) {
        match self.position(&key) {
            Some(pos) => self.entries[pos].1 = property,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, property));
            }
        }
    }

    fn remove(&mut self, key: &str) -> Option<Property> {
        let pos = self.index.remove(key)?;
        let (_, property) = self.entries.remove(pos);
        for (i, (k, _)) in self.entries.iter().enumerate().skip(pos) {
            self.index.insert(k.clone(), i);
        }
        Some(property)
    }
}

/// Object is a keyed mapping with reference semantics.
///
/// Cloning an `Object` clones the handle, not the properties: both handles
/// observe the same mutations. Properties keep their insertion order.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<Properties>>);

impl Object {
    /// Creates a new empty object.
    pub fn new() -> Self {
        Object::default()
    }

    /// Creates an object from enumerable key/value pairs.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let object = Object::new();
        for (key, value) in entries {
            object.set(key, value);
        }
        object
    }

    /// Returns the identity of this object.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// Returns true if both handles point at the same object.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the value of an own property, enumerable or not.
    pub fn get(&self, key: &str) -> Option<Value> {
        let props = self.0.borrow();
        props.position(key).map(|pos| props.entries[pos].1.value.clone())
    }

    /// Returns the full descriptor of an own property.
    pub fn get_property(&self, key: &str) -> Option<Property> {
        let props = self.0.borrow();
        props.position(key).map(|pos| props.entries[pos].1.clone())
    }

    /// Returns true if `key` is an own property.
    pub fn has_own(&self, key: &str) -> bool {
        self.0.borrow().position(key).is_some()
    }

    /// Assigns a value. Existing properties keep their enumerability, new
    /// ones are enumerable.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let mut props = self.0.borrow_mut();
        match props.position(&key) {
            Some(pos) => props.entries[pos].1.value = value,
            None => props.define(key, Property::new(value)),
        }
    }

    /// Defines (or redefines) a property with an explicit descriptor.
    pub fn define(&self, key: impl Into<String>, property: Property) {
        self.0.borrow_mut().define(key.into(), property);
    }

    /// Removes an own property, returning its value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().remove(key).map(|p| p.value)
    }

    /// Returns the enumerable own keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.0
            .borrow()
            .entries
            .iter()
            .filter(|(_, p)| p.enumerable)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Returns a snapshot of the enumerable own entries.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .entries
            .iter()
            .filter(|(_, p)| p.enumerable)
            .map(|(k, p)| (k.clone(), p.value.clone()))
            .collect()
    }

    /// Returns a snapshot of every own property descriptor.
    pub fn properties(&self) -> Vec<(String, Property)> {
        self.0.borrow().entries.clone()
    }

    /// Returns the number of enumerable own properties.
    pub fn len(&self) -> usize {
        self.0
            .borrow()
            .entries
            .iter()
            .filter(|(_, p)| p.enumerable)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a new object carrying the same property descriptors.
    ///
    /// Nested values are shared with `self`.
    pub fn shallow_copy(&self) -> Object {
        let copy = Object::new();
        for (key, property) in self.properties() {
            copy.define(key, property);
        }
        copy
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let ours = self.entries();
        if ours.len() != other.len() {
            return false;
        }
        ours.iter().all(|(key, value)| match other.get_property(key) {
            Some(p) if p.enumerable => &p.value == value,
            _ => false,
        })
    }
}

/// Largest run of `Undefined` padding [`Array::set`] will insert.
pub const MAX_ARRAY_PADDING: usize = 1 << 16;

/// Array is an ordered sequence with reference semantics.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    /// Creates a new empty array.
    pub fn new() -> Self {
        Array::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        Array(Rc::new(RefCell::new(items)))
    }

    /// Returns the identity of this array.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// Returns true if both handles point at the same array.
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Reports whether [`Array::set`] would write at `index`.
    pub fn accepts(&self, index: usize) -> bool {
        index <= self.len().saturating_add(MAX_ARRAY_PADDING)
    }

    /// Writes `value` at `index`, padding any gap with `Undefined`.
    ///
    /// Positions more than [`MAX_ARRAY_PADDING`] past the end are not
    /// materialized; the write is skipped and false is returned.
    pub fn set(&self, index: usize, value: Value) -> bool {
        if !self.accepts(index) {
            return false;
        }
        let mut items = self.0.borrow_mut();
        if index >= items.len() {
            items.resize(index + 1, Value::Undefined);
        }
        items[index] = value;
        true
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Returns a snapshot of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.to_vec() == other.to_vec()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Array::from_vec(iter.into_iter().collect())
    }
}

/// Parses a canonical array index ("0", "17"; not "01" or "-1").
pub fn array_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|i| *i < u32::MAX).map(|i| i as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_keeps_insertion_order() {
        let object = Object::new();
        object.set("b", Value::from(1));
        object.set("a", Value::from(2));
        object.set("b", Value::from(3));
        assert_eq!(object.keys(), vec!["b".to_string(), "a".to_string()]);
        assert_eq!(object.get("b"), Some(Value::from(3)));
    }

    #[test]
    fn test_object_remove_reindexes() {
        let object = Object::from_entries([
            ("a", Value::from(1)),
            ("b", Value::from(2)),
            ("c", Value::from(3)),
        ]);
        assert_eq!(object.remove("a"), Some(Value::from(1)));
        assert_eq!(object.get("c"), Some(Value::from(3)));
        object.set("c", Value::from(4));
        assert_eq!(object.entries(), vec![
            ("b".to_string(), Value::from(2)),
            ("c".to_string(), Value::from(4)),
        ]);
    }

    #[test]
    fn test_hidden_properties() {
        let object = Object::new();
        object.define("secret", Property::hidden(Value::from("x")));
        assert!(object.has_own("secret"));
        assert!(object.keys().is_empty());
        assert!(object.is_empty());

        object.set("secret", Value::from("y"));
        let property = object.get_property("secret").unwrap();
        assert!(!property.enumerable);
        assert_eq!(property.value, Value::from("y"));
    }

    #[test]
    fn test_handles_share_state() {
        let a = Object::new();
        let b = a.clone();
        b.set("x", Value::from(1));
        assert!(a.ptr_eq(&b));
        assert_eq!(a.get("x"), Some(Value::from(1)));

        let copy = a.shallow_copy();
        assert!(!copy.ptr_eq(&a));
        assert_eq!(copy, a);
    }

    #[test]
    fn test_array_set_pads() {
        let array = Array::from_vec(vec![Value::from(1)]);
        assert!(array.set(3, Value::from(4)));
        assert_eq!(array.len(), 4);
        assert_eq!(array.get(1), Some(Value::Undefined));
        assert_eq!(array.get(3), Some(Value::from(4)));
    }

    #[test]
    fn test_array_set_skips_far_index() {
        let array = Array::from_vec(vec![Value::from(1)]);
        assert!(!array.set(4_294_967_294, Value::from(2)));
        assert!(!array.set(MAX_ARRAY_PADDING + 2, Value::from(2)));
        assert_eq!(array.len(), 1);

        assert!(array.set(MAX_ARRAY_PADDING + 1, Value::from(3)));
        assert_eq!(array.len(), MAX_ARRAY_PADDING + 2);
    }

    #[test]
    fn test_array_index() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index("01"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("1.5"), None);
        assert_eq!(array_index("length"), None);
        assert_eq!(array_index(""), None);
    }
}
