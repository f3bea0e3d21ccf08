//! Cycle detection.

use crate::value::Value;

/// Reports whether `value` reaches itself through nested references.
///
/// Only the current descent path counts, so a subtree shared by two
/// siblings is not a cycle. Objects, arrays, error properties and the
/// contents of maps and sets are traversed; functions are not.
pub fn is_circular(value: &Value) -> bool {
    CycleProbe::default().visit(value)
}

#[derive(Default)]
struct CycleProbe {
    ancestors: Vec<usize>,
}

impl CycleProbe {
    fn visit(&mut self, value: &Value) -> bool {
        match value {
            Value::Object(_) | Value::Array(_) | Value::Error(_) => {
                let Some(id) = value.identity() else {
                    return false;
                };
                if self.ancestors.contains(&id) {
                    return true;
                }
                self.ancestors.push(id);
                let found = value
                    .own_enumerable_entries()
                    .iter()
                    .any(|(_, child)| self.visit(child));
                self.ancestors.pop();
                found
            }
            Value::Map(map) => map
                .iter()
                .any(|(key, child)| self.visit(key) || self.visit(child)),
            Value::Set(set) => set.iter().any(|member| self.visit(member)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{from_json, ErrorValue, KeyedMap, Object, ValueSet};

    #[test]
    fn test_plain_tree_is_not_circular() {
        let value = from_json(r#"{"a": {"b": [1, {"c": 2}]}, "d": null}"#).unwrap();
        assert!(!is_circular(&value));
        assert!(!is_circular(&Value::from(1)));
        assert!(!is_circular(&Value::Null));
    }

    #[test]
    fn test_self_reference() {
        let a = Object::new();
        let root = Value::object([("a", Value::Object(a.clone()))]);
        a.set("c", Value::object([("c", Value::from(1))]));
        assert!(!is_circular(&root));

        a.set("c", Value::Object(a.clone()));
        assert!(is_circular(&root));
    }

    #[test]
    fn test_array_cycle() {
        let value = Value::array([Value::from(1)]);
        if let Value::Array(array) = &value {
            array.push(value.clone());
        }
        assert!(is_circular(&value));
    }

    #[test]
    fn test_shared_subtree_is_not_circular() {
        let shared = Value::object([("x", Value::from(1))]);
        let root = Value::object([("a", shared.clone()), ("b", shared)]);
        assert!(!is_circular(&root));
    }

    #[test]
    fn test_cycle_through_special_kinds() {
        let object = Object::new();
        let error = ErrorValue::new("boom");
        error.properties().set("owner", Value::Object(object.clone()));
        object.set("error", Value::Error(error));
        assert!(is_circular(&Value::Object(object.clone())));

        let inner = Object::new();
        let map: KeyedMap = [(Value::from("k"), Value::Object(inner.clone()))]
            .into_iter()
            .collect();
        inner.set("map", Value::Map(map.clone()));
        assert!(is_circular(&Value::Map(map)));

        let set: ValueSet = [Value::Object(object)].into_iter().collect();
        assert!(is_circular(&Value::Set(set)));
    }
}
