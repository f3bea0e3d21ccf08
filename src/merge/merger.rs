//! The recursive merge engine.

use super::array::{array_merge_concat, array_merge_union};
use super::guard::property_is_unsafe;
use super::{ArrayMerge, MergeError, MergeOptions};
use crate::value::{
    array_index, property_key, strict_equals, Array, ErrorValue, Function, KeyedMap, Object,
    Value, ValueSet,
};
use std::collections::HashSet;
use std::rc::Rc;

/// Merger carries the state of one merge call tree: the options and the
/// identities of the source mappings and sequences currently being
/// descended into.
///
/// A merger is created per top-level call; strategies and callers that
/// need to recurse receive it so that cycle detection spans the whole
/// call tree.
pub struct Merger<'a> {
    options: &'a MergeOptions,
    visited: HashSet<usize>,
    path: Vec<String>,
}

/// Where the keys of an object source are written.
enum PropertyTarget {
    /// An object, or the attributes of a function or error.
    Bag(Object),
    /// A sequence: index keys address positions, other keys are dropped.
    Sequence(Array),
}

impl<'a> Merger<'a> {
    /// Creates a new merger with an empty visited set.
    pub fn new(options: &'a MergeOptions) -> Self {
        Merger {
            options,
            visited: HashSet::new(),
            path: Vec::new(),
        }
    }

    pub fn options(&self) -> &MergeOptions {
        self.options
    }

    /// Merges `source` into `target`.
    ///
    /// Mutable composites in `target` are updated in place and returned;
    /// a new value is returned when the kinds force a replacement.
    pub fn merge(&mut self, target: Value, source: &Value) -> Result<Value, MergeError> {
        if source.is_undefined() || strict_equals(&target, source) {
            return Ok(target);
        }
        if source.is_null() {
            if !self.options.ignore_null || target.is_undefined() {
                return Ok(Value::Null);
            }
            return Ok(target);
        }
        if target.is_nullish() {
            let shell = if source.is_array() {
                Value::Array(Array::new())
            } else {
                Value::Object(Object::new())
            };
            return self.merge(shell, source);
        }

        match source {
            Value::Date(date) => Ok(Value::Date(*date)),
            Value::RegExp(re) => Ok(Value::RegExp(re.duplicate())),
            Value::Buffer(bytes) => Ok(Value::Buffer(bytes.clone())),
            Value::TypedArray(array) => Ok(Value::TypedArray(array.clone())),
            Value::ArrayBuffer(bytes) => Ok(Value::ArrayBuffer(bytes.clone())),
            Value::Map(map) => self.merge_map(target, map),
            Value::Set(set) => Ok(Value::Set(merge_set(&target, set))),
            Value::Error(error) => Ok(Value::Error(copy_error(error))),
            Value::Function(function) => Ok(Value::Function(forward_function(function))),
            Value::Array(array) => self.merge_array(target, array),
            Value::Object(object) => self.merge_object(target, object),
            Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::BigInt(_)
            | Value::Symbol(_) => Ok(source.clone()),
        }
    }

    /// Returns an independent copy of `source`.
    pub fn clone_value(&mut self, source: &Value) -> Result<Value, MergeError> {
        self.merge(Value::Null, source)
    }

    /// Returns an independent copy of the element at `index` of the
    /// sequence being merged.
    pub fn clone_element(&mut self, index: usize, source: &Value) -> Result<Value, MergeError> {
        self.merge_at(format!("[{}]", index), Value::Null, source)
    }

    fn merge_at(
        &mut self,
        segment: String,
        target: Value,
        source: &Value,
    ) -> Result<Value, MergeError> {
        self.path.push(segment);
        let result = self.merge(target, source);
        self.path.pop();
        result
    }

    /// Marks `id` as being descended into. Returns false when the subtree
    /// must be skipped because it is already on the stack.
    fn enter(&mut self, id: usize) -> Result<bool, MergeError> {
        if self.visited.insert(id) {
            return Ok(true);
        }
        if self.options.ignore_circular {
            Ok(false)
        } else {
            Err(MergeError::circular(self.current_path()))
        }
    }

    fn leave(&mut self, id: usize) {
        self.visited.remove(&id);
    }

    fn current_path(&self) -> String {
        if self.path.is_empty() {
            ".".to_string()
        } else {
            self.path.concat()
        }
    }

    fn merge_map(&mut self, target: Value, source: &KeyedMap) -> Result<Value, MergeError> {
        let Value::Map(mut merged) = target else {
            return Ok(Value::Map(source.clone()));
        };
        for (key, value) in source.iter() {
            let existing = merged.get(key).cloned().unwrap_or_default();
            let segment = format!("[{}]", property_key(key));
            let value = self.merge_at(segment, existing, value)?;
            merged.insert(key.clone(), value);
        }
        Ok(Value::Map(merged))
    }

    fn merge_array(&mut self, target: Value, source: &Array) -> Result<Value, MergeError> {
        let id = source.id();
        if !self.enter(id)? {
            return Ok(target);
        }
        let target = match target {
            Value::Array(array) => array,
            _ => Array::new(),
        };
        let result = self.apply_strategy(target, source);
        self.leave(id);
        result
    }

    fn apply_strategy(&mut self, target: Array, source: &Array) -> Result<Value, MergeError> {
        let options = self.options;
        match &options.array_merge {
            ArrayMerge::Union => array_merge_union(self, target, source),
            ArrayMerge::Concat => array_merge_concat(self, target, source),
            ArrayMerge::Custom(strategy) => (**strategy)(self, target, source),
        }
    }

    fn merge_object(&mut self, target: Value, source: &Object) -> Result<Value, MergeError> {
        let properties = match &target {
            Value::Object(object) => PropertyTarget::Bag(object.clone()),
            Value::Function(function) => PropertyTarget::Bag(function.attributes().clone()),
            Value::Error(error) => PropertyTarget::Bag(error.properties().clone()),
            Value::Array(array) => PropertyTarget::Sequence(array.clone()),
            _ => return Ok(Value::Object(source.clone())),
        };

        let id = source.id();
        if !self.enter(id)? {
            return Ok(target);
        }
        let result = self.merge_properties(&target, &properties, source);
        self.leave(id);
        result.map(|()| target)
    }

    fn merge_properties(
        &mut self,
        target: &Value,
        properties: &PropertyTarget,
        source: &Object,
    ) -> Result<(), MergeError> {
        for (key, value) in source.entries() {
            match properties {
                PropertyTarget::Bag(object) => {
                    if property_is_unsafe(target, object, &key) {
                        continue;
                    }
                    let existing = object.get(&key).unwrap_or_default();
                    let merged = self.merge_at(format!(".{}", key), existing, &value)?;
                    object.set(key, merged);
                }
                PropertyTarget::Sequence(array) => {
                    let Some(index) = array_index(&key).filter(|i| array.accepts(*i)) else {
                        continue;
                    };
                    let existing = array.get(index).unwrap_or_default();
                    let merged = self.merge_at(format!("[{}]", index), existing, &value)?;
                    array.set(index, merged);
                }
            }
        }
        Ok(())
    }
}

fn merge_set(target: &Value, source: &ValueSet) -> ValueSet {
    match target {
        Value::Set(existing) => existing.union(source),
        _ => source.clone(),
    }
}

/// Creates a new error with the name of `source` and a copy of all its
/// property descriptors.
fn copy_error(source: &ErrorValue) -> ErrorValue {
    ErrorValue::from_parts(source.name(), source.properties().shallow_copy())
}

/// Creates a new function that forwards to `source` and carries a copy of
/// its attributes.
fn forward_function(source: &Function) -> Function {
    let inner = source.clone();
    Function::from_parts(
        Rc::new(move |args: &[Value]| inner.call(args)),
        source.attributes().shallow_copy(),
    )
}

/// Merges each source into `target` from left to right, using default
/// options.
///
/// Returns `target` unchanged when `sources` is empty.
pub fn merge(target: Value, sources: &[Value]) -> Result<Value, MergeError> {
    merge_ext(&MergeOptions::default(), target, sources)
}

/// Merges each source into `target` from left to right.
///
/// One visited set is shared by the whole fold.
pub fn merge_ext(
    options: &MergeOptions,
    target: Value,
    sources: &[Value],
) -> Result<Value, MergeError> {
    let mut merger = Merger::new(options);
    sources
        .iter()
        .try_fold(target, |acc, source| merger.merge(acc, source))
}

/// Merges a single `source` into `target`.
pub fn merge_value(
    options: &MergeOptions,
    target: Value,
    source: &Value,
) -> Result<Value, MergeError> {
    Merger::new(options).merge(target, source)
}
