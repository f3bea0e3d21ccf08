//! Tests for get, set, pick and omit.

#[cfg(test)]
mod tests {
    use crate::merge::merge;
    use crate::path::{get, get_or, omit, pick, set};
    use crate::value::{from_json, strict_equals, ErrorValue, Function, Property, Value};
    use pretty_assertions::assert_eq;

    /// Helper to parse a JSON fixture.
    fn json(text: &str) -> Value {
        from_json(text).unwrap()
    }

    #[test]
    fn test_get_from_null() {
        assert_eq!(get(&Value::Null, ["test", "test"]), None);
        assert_eq!(get(&Value::Undefined, "a"), None);
    }

    #[test]
    fn test_get_with_empty_path() {
        let obj = json(r#"{"test": {"a": 1}}"#);
        assert_eq!(get(&obj, ""), None);
        assert_eq!(get(&obj, Vec::<String>::new()), None);
        assert_eq!(get_or(&obj, "", Value::from("dflt")), Value::from("dflt"));
    }

    #[test]
    fn test_get_existing_object() {
        let obj = json(r#"{"test": {"test": {"test": {"a": 1}}, "test2": {"b": 2}}}"#);
        assert_eq!(get(&obj, "test.test"), Some(json(r#"{"test": {"a": 1}}"#)));
    }

    #[test]
    fn test_get_falsy_value() {
        let obj = json(r#"{"test": {"test": 0, "test2": {"b": 2}}}"#);
        assert_eq!(get(&obj, ["test", "test"]), Some(Value::from(0)));
        assert_eq!(get_or(&obj, "test.test", Value::from(5)), Value::from(0));
    }

    #[test]
    fn test_get_missing_property() {
        let obj = json(r#"{"test": {"test": 0, "test2": {"b": 2}}}"#);
        assert_eq!(get(&obj, "there.is.no.such.prop"), None);
        assert_eq!(get(&obj, "test.test.deeper"), None);
        assert_eq!(get_or(&obj, "nope", Value::from(7)), Value::from(7));
    }

    #[test]
    fn test_get_shared_reference() {
        let obj = json(r#"{"a": {"b": {"c": 1}}}"#);
        let inner = get(&obj, "a.b").unwrap();
        let again = get(&obj, ["a", "b"]).unwrap();
        assert!(strict_equals(&inner, &again));
    }

    #[test]
    fn test_get_sequences_and_strings() {
        let obj = json(r#"{"list": [10, 20, 30], "name": "héllo"}"#);
        assert_eq!(get(&obj, "list[1]"), Some(Value::from(20)));
        assert_eq!(get(&obj, "list.length"), Some(Value::from(3)));
        assert_eq!(get(&obj, "list.3"), None);
        assert_eq!(get(&obj, "name.length"), Some(Value::from(5)));
        assert_eq!(get(&obj, "name.1"), Some(Value::from("é")));
    }

    #[test]
    fn test_get_special_owners() {
        let error = ErrorValue::new("boom");
        error.properties().set("code", Value::from(42));
        let f = Function::new("handler", |_| Value::Undefined);
        f.attributes().set("retries", Value::from(3));
        let obj = Value::object([
            ("err", Value::Error(error)),
            ("fn", Value::Function(f)),
            ("buf", Value::Buffer(vec![7, 8])),
        ]);

        assert_eq!(get(&obj, "err.message"), Some(Value::from("boom")));
        assert_eq!(get(&obj, "err.code"), Some(Value::from(42)));
        assert_eq!(get(&obj, "fn.retries"), Some(Value::from(3)));
        assert_eq!(get(&obj, "fn.name"), Some(Value::from("handler")));
        assert_eq!(get(&obj, "buf.1"), Some(Value::from(8)));
    }

    #[test]
    fn test_get_hidden_property() {
        let obj = json("{}");
        obj.as_object()
            .unwrap()
            .define("secret", Property::hidden(Value::from(1)));
        assert_eq!(get(&obj, "secret"), Some(Value::from(1)));
    }

    #[test]
    fn test_set_quoted_path() {
        let result = set(&json("{}"), r#"a."b.0".c["d.e.f"]"#, Value::from(1)).unwrap();
        assert_eq!(result, json(r#"{"a": {"b.0": {"c": {"d.e.f": 1}}}}"#));
        assert_eq!(get(&result, r#"a."b.0".c["d.e.f"]"#), Some(Value::from(1)));
    }

    #[test]
    fn test_set_without_key() {
        assert_eq!(set(&json("{}"), "", Value::from(1)), None);
        assert_eq!(set(&Value::Null, Vec::<String>::new(), Value::from(1)), None);
    }

    #[test]
    fn test_set_returns_same_root() {
        let obj = json(r#"{"a": {"b": {"c": 1}}}"#);
        let result = set(&obj, "a.b.d", Value::from(2)).unwrap();
        assert!(strict_equals(&result, &obj));
        assert_eq!(obj, json(r#"{"a": {"b": {"c": 1, "d": 2}}}"#));
    }

    #[test]
    fn test_set_null_deletes() {
        let obj = json(r#"{"a": {"b": {"c": 1}}}"#);
        let result = set(&obj, "a.b", Value::Null).unwrap();
        assert_eq!(result, json(r#"{"a": {}}"#));
    }

    #[test]
    fn test_set_replaces_falsy_intermediates() {
        let obj = json(r#"{"a": 0, "b": ""}"#);
        set(&obj, "a.x", Value::from(1));
        set(&obj, "b.y", Value::from(2));
        assert_eq!(obj, json(r#"{"a": {"x": 1}, "b": {"y": 2}}"#));
    }

    #[test]
    fn test_set_stops_at_truthy_primitive() {
        let obj = json(r#"{"a": 5}"#);
        let result = set(&obj, "a.b.c", Value::from(1)).unwrap();
        assert!(strict_equals(&result, &obj));
        assert_eq!(obj, json(r#"{"a": 5}"#));
    }

    #[test]
    fn test_set_on_falsy_root() {
        assert_eq!(set(&Value::Null, "a.b", Value::from(1)), Some(Value::Null));
    }

    #[test]
    fn test_set_sequence_positions() {
        let obj = json(r#"{"list": [1, 2, 3]}"#);
        set(&obj, "list[4]", Value::from(5));
        set(&obj, "list.0", Value::Null);
        assert_eq!(
            get(&obj, "list"),
            Some(Value::array([
                Value::Undefined,
                Value::from(2),
                Value::from(3),
                Value::Undefined,
                Value::from(5),
            ]))
        );
    }

    #[test]
    fn test_set_skips_far_sequence_position() {
        let obj = json(r#"{"list": [1]}"#);
        let result = set(&obj, "list[4294967294]", Value::from(1)).unwrap();
        assert!(strict_equals(&result, &obj));
        assert_eq!(obj, json(r#"{"list": [1]}"#));

        set(&obj, "list[4294967294].x", Value::from(1));
        assert_eq!(obj, json(r#"{"list": [1]}"#));
    }

    #[test]
    fn test_pick() {
        let o = json(r#"{"a": 1, "b": 2, "c": 3, "d": 4}"#);
        let expected = json(r#"{"a": 1, "d": 4}"#);
        assert_eq!(pick(&o, ["a", "d"]).unwrap(), expected);
        assert_eq!(pick(&o, "a,d").unwrap(), expected);
        assert_eq!(pick(&o, "a, d ").unwrap(), expected);
        assert_eq!(pick(&o, "d").unwrap(), json(r#"{"d": 4}"#));
    }

    #[test]
    fn test_pick_nested() {
        let o = json(r#"{"a": {"a": 1, "b": 2}, "c": {"c": 3, "d": 4}, "e": 5}"#);
        assert_eq!(pick(&o, "a.b, c.d").unwrap(), json(r#"{"a": {"b": 2}, "c": {"d": 4}}"#));
    }

    #[test]
    fn test_pick_brackets() {
        let o = json(r#"{"a": 1, "b": [1, 2], "c": {"cc": 3, "c-d": 4}, "0d": {"0d0": 5}}"#);
        let expected = json(r#"{"a": 1, "b": {"1": 2}, "c": {"c-d": 4}, "0d": {"0d0": 5}}"#);
        assert_eq!(pick(&o, r#"a, b[1], c["c-d"], 0d.0d0"#).unwrap(), expected);
    }

    #[test]
    fn test_pick_skips_nullish_and_copies() {
        let o = json(r#"{"a": null, "b": {"x": 1}}"#);
        let picked = pick(&o, "a, b, c").unwrap();
        assert_eq!(picked, json(r#"{"b": {"x": 1}}"#));
        assert!(!strict_equals(&get(&picked, "b").unwrap(), &get(&o, "b").unwrap()));
    }

    #[test]
    fn test_pick_from_non_composite() {
        assert_eq!(pick(&json("{}"), "a,d").unwrap(), json("{}"));
        assert_eq!(pick(&Value::Null, "a,d").unwrap(), Value::Undefined);
        assert_eq!(pick(&Value::from(""), "a,d").unwrap(), Value::Undefined);
    }

    #[test]
    fn test_omit() {
        let o = json(r#"{"a": 1, "b": 2, "c": 3, "d": 4}"#);
        let expected = json(r#"{"b": 2, "c": 3}"#);
        assert_eq!(omit(&o, ["a", "d"]).unwrap(), expected);
        assert_eq!(omit(&o, "a,d").unwrap(), expected);
        assert_eq!(omit(&o, "d").unwrap(), json(r#"{"a": 1, "b": 2, "c": 3}"#));
        // the input is left untouched
        assert_eq!(o, json(r#"{"a": 1, "b": 2, "c": 3, "d": 4}"#));
    }

    #[test]
    fn test_omit_nested() {
        let o = json(r#"{"a": {"a": 1, "b": 2}, "c": {"c": 3, "d": 4}, "e": 5}"#);
        assert_eq!(
            omit(&o, "a.b, c.d").unwrap(),
            json(r#"{"a": {"a": 1}, "c": {"c": 3}, "e": 5}"#)
        );
    }

    #[test]
    fn test_omit_keeps_falsy_values() {
        let o = json(r#"{"a": 0, "b": 1}"#);
        assert_eq!(omit(&o, "a, b").unwrap(), json(r#"{"a": 0}"#));
    }

    #[test]
    fn test_omit_from_non_composite() {
        assert_eq!(omit(&json("{}"), "a,d").unwrap(), json("{}"));
        assert_eq!(omit(&Value::Null, "a,d").unwrap(), Value::Undefined);
        assert_eq!(omit(&Value::from(""), "a,d").unwrap(), Value::Undefined);
    }

    #[test]
    fn test_pick_omit_complement() {
        let o = json(r#"{"a": 1, "b": 2, "c": 3, "d": 4}"#);
        let picked = pick(&o, "a,d").unwrap();
        let omitted = omit(&o, "a,d").unwrap();
        let merged = merge(picked, &[omitted]).unwrap();
        assert_eq!(merged, o);
    }
}
