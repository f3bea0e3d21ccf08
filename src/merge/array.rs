//! Sequence merge strategies.
//!
//! Both strategies have the [`super::ArrayMergeFn`] signature, so callers
//! can wrap or compose them in an [`super::ArrayMerge::Custom`] strategy.

use super::{MergeError, Merger};
use crate::compare::deep_equal;
use crate::value::{strict_equals, Array, Value};

/// Appends the elements of `source` that `target` does not already hold.
///
/// Elements are tested against a snapshot of `target` taken before the
/// first append: first by identity, then (for composites) by deep
/// equality, most recent first. Primitives, functions and nullish values
/// that miss the identity test are appended as they are; composites are
/// appended as independent copies. Duplicates within `source` itself are
/// kept.
///
/// `target` is mutated and returned.
pub fn array_merge_union(
    merger: &mut Merger<'_>,
    target: Array,
    source: &Array,
) -> Result<Value, MergeError> {
    let test = target.to_vec();
    for (index, item) in source.to_vec().into_iter().enumerate() {
        if test.iter().any(|existing| strict_equals(existing, &item)) {
            continue;
        }
        if !item.is_object() {
            target.push(item);
            continue;
        }
        if test.iter().rev().any(|existing| deep_equal(existing, &item)) {
            continue;
        }
        let copy = merger.clone_element(index, &item)?;
        target.push(copy);
    }
    Ok(Value::Array(target))
}

/// Returns a new sequence holding copies of the elements of `target`
/// followed by copies of the elements of `source`.
///
/// Nullish elements are kept as they are.
pub fn array_merge_concat(
    merger: &mut Merger<'_>,
    target: Array,
    source: &Array,
) -> Result<Value, MergeError> {
    let merged = Array::new();
    for (index, item) in target.to_vec().into_iter().chain(source.to_vec()).enumerate() {
        if item.is_nullish() {
            merged.push(item);
        } else {
            merged.push(merger.clone_element(index, &item)?);
        }
    }
    Ok(Value::Array(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::MergeOptions;
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    fn array(json: &str) -> Array {
        from_json(json).unwrap().as_array().cloned().unwrap()
    }

    #[test]
    fn test_union_primitives() {
        let options = MergeOptions::default();
        let mut merger = Merger::new(&options);
        let target = array("[1, 2, 3]");
        let result = array_merge_union(&mut merger, target.clone(), &array("[2, 3, 4]")).unwrap();
        assert_eq!(result, from_json("[1, 2, 3, 4]").unwrap());
        assert!(strict_equals(&result, &Value::Array(target)));
    }

    #[test]
    fn test_union_objects() {
        let options = MergeOptions::default();
        let mut merger = Merger::new(&options);
        let target = array(r#"[{"a": 1}, {"b": 2}, 3]"#);
        let source = array(r#"[{"b": 2}, {"c": 3}, 3]"#);
        let result = array_merge_union(&mut merger, target, &source).unwrap();
        assert_eq!(result, from_json(r#"[{"a": 1}, {"b": 2}, 3, {"c": 3}]"#).unwrap());

        let appended = result.as_array().and_then(|a| a.get(3)).unwrap();
        assert!(!strict_equals(&appended, &source.get(1).unwrap()));
    }

    #[test]
    fn test_union_keeps_duplicates_within_source() {
        let options = MergeOptions::default();
        let mut merger = Merger::new(&options);
        let result = array_merge_union(&mut merger, array("[1]"), &array("[2, 2]")).unwrap();
        assert_eq!(result, from_json("[1, 2, 2]").unwrap());
    }

    #[test]
    fn test_concat() {
        let options = MergeOptions::default();
        let mut merger = Merger::new(&options);
        let target = array(r#"[1, {"a": 1}]"#);
        let source = array(r#"[1, null, {"a": 1}]"#);
        let result = array_merge_concat(&mut merger, target.clone(), &source).unwrap();
        assert_eq!(result, from_json(r#"[1, {"a": 1}, 1, null, {"a": 1}]"#).unwrap());
        assert!(!strict_equals(&result, &Value::Array(target.clone())));

        let copied = result.as_array().and_then(|a| a.get(1)).unwrap();
        assert!(!strict_equals(&copied, &target.get(1).unwrap()));
    }
}
