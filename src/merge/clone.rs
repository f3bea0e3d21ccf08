//! Deep copies.

use super::{merge_value, MergeError, MergeOptions};
use crate::value::{Array, Object, Value};

/// Returns a deep copy of `value`.
///
/// The value is merged into an empty sequence (when it is one) or an
/// empty mapping, so the copy shares no mutable object or sequence with
/// the input. Special kinds are rebuilt the way a merge rebuilds them:
/// functions become forwarding wrappers, errors get a fresh property bag.
/// Primitives and `Null` come back as they are; `Undefined` yields an
/// empty mapping.
pub fn clone(value: &Value) -> Result<Value, MergeError> {
    let shell = if value.is_array() {
        Value::Array(Array::new())
    } else {
        Value::Object(Object::new())
    };
    merge_value(&MergeOptions::default(), shell, value)
}
