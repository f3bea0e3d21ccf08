//! Prototype-pollution guard.
//!
//! Values carry no prototype chain. The keys a dynamic runtime resolves
//! through inheritance are refused all the same, unless the target
//! already owns them as enumerable properties.

use crate::value::{Object, Value};
use once_cell::sync::Lazy;
use std::collections::HashSet;

static OBJECT_SURFACE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "__proto__",
        "constructor",
        "hasOwnProperty",
        "isPrototypeOf",
        "propertyIsEnumerable",
        "toLocaleString",
        "toString",
        "valueOf",
        "__defineGetter__",
        "__defineSetter__",
        "__lookupGetter__",
        "__lookupSetter__",
    ]
    .into_iter()
    .collect()
});

static FUNCTION_SURFACE: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["apply", "bind", "call", "arguments", "caller"].into_iter().collect());

static ERROR_SURFACE: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["name", "message", "stack"].into_iter().collect());

/// Returns true if `key` names an inherited property of `target`'s kind.
pub fn is_inherited_key(target: &Value, key: &str) -> bool {
    if OBJECT_SURFACE.contains(key) {
        return true;
    }
    match target {
        Value::Function(_) => FUNCTION_SURFACE.contains(key),
        Value::Error(_) => ERROR_SURFACE.contains(key),
        _ => false,
    }
}

/// Returns true if writing `key` into `properties` (the property bag of
/// `target`) must be refused.
///
/// A key is unsafe when it exists on the target but is not an own
/// enumerable property: either an own non-enumerable property, or a key
/// of the inherited surface that the target does not own.
pub fn property_is_unsafe(target: &Value, properties: &Object, key: &str) -> bool {
    match properties.get_property(key) {
        Some(property) => !property.enumerable,
        None => is_inherited_key(target, key),
    }
}
