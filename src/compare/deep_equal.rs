//! Structural equality over value trees.

use crate::value::{loose_equals, strict_equals, KeyedMap, RegExp, Value, ValueSet};

/// Reports whether `a` and `b` are structurally equal.
///
/// Rules are tried in order:
///
/// 1. strict equality (same reference or same primitive);
/// 2. two buffers compare byte by byte;
/// 3. two dates compare by instant;
/// 4. two patterns compare source, `global`, `multiline`, `ignoreCase`
///    and the match cursor;
/// 5. two maps compare entry by entry, two sets member by member;
/// 6. two non-composites use loose equality (`null == undefined`,
///    `"1" == 1`);
/// 7. anything else compares own enumerable properties, ignoring order.
///    A primitive on one side takes part with the properties it would
///    expose as an object: a string its indexed characters, other
///    primitives none. So `{}` equals `0` and `"ab"` equals
///    `{"0": "a", "1": "b"}`; `Null` and `Undefined` equal no composite.
///
/// An own property literally named `prototype` must be the same on both
/// sides (by reference) for composites to be equal. Functions carry their
/// own `prototype`, so a function equals only itself.
///
/// The comparison does not terminate on cyclic input; check with
/// [`crate::is_circular`] first when the input may contain cycles.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    if strict_equals(a, b) {
        return true;
    }
    match (a, b) {
        (Value::Buffer(x), Value::Buffer(y)) => x == y,
        (Value::Date(x), Value::Date(y)) => x.timestamp_millis() == y.timestamp_millis(),
        (Value::RegExp(x), Value::RegExp(y)) => patterns_equal(x, y),
        (Value::Map(x), Value::Map(y)) => maps_equal(x, y),
        (Value::Set(x), Value::Set(y)) => sets_equal(x, y),
        _ if !a.is_object() && !b.is_object() => loose_equals(a, b),
        _ => objects_equivalent(a, b),
    }
}

fn patterns_equal(a: &RegExp, b: &RegExp) -> bool {
    a.source() == b.source()
        && a.global() == b.global()
        && a.multiline() == b.multiline()
        && a.ignore_case() == b.ignore_case()
        && a.last_index() == b.last_index()
}

fn maps_equal(a: &KeyedMap, b: &KeyedMap) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| deep_equal(value, other)))
}

fn sets_equal(a: &ValueSet, b: &ValueSet) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|item| b.contains(item) || b.iter().any(|other| deep_equal(item, other)))
}

fn objects_equivalent(a: &Value, b: &Value) -> bool {
    if a.is_nullish() || b.is_nullish() || a.is_function() || b.is_function() {
        return false;
    }
    if !strict_equals(&prototype_property(a), &prototype_property(b)) {
        return false;
    }

    let mut ours = a.own_enumerable_entries();
    let mut theirs = b.own_enumerable_entries();
    if ours.len() != theirs.len() {
        return false;
    }
    ours.sort_by(|x, y| x.0.cmp(&y.0));
    theirs.sort_by(|x, y| x.0.cmp(&y.0));
    if ours.iter().zip(&theirs).any(|(x, y)| x.0 != y.0) {
        return false;
    }
    ours.iter()
        .zip(&theirs)
        .rev()
        .all(|((_, x), (_, y))| deep_equal(x, y))
}

/// Returns the own property named `prototype`, or `Undefined`.
fn prototype_property(value: &Value) -> Value {
    let found = match value {
        Value::Object(o) => o.get("prototype"),
        Value::Error(e) => e.properties().get("prototype"),
        _ => None,
    };
    found.unwrap_or_default()
}
