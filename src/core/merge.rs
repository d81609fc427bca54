//! Recursive override merge over JSON trees.

use serde_json::{Map, Value};

/// Merge `overrides` into `base`.
///
/// Where both sides hold an object at the same path the objects are merged
/// key by key; everywhere else the override replaces the base value. Lists
/// are replaced as a whole, never concatenated or merged by index.
pub fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(target), Value::Object(source)) => merge_maps(target, source),
        (base, overrides) => *base = overrides,
    }
}

/// [`merge`] for two objects; `target` stays an object.
pub fn merge_maps(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        let nested = value.is_object() && target.get(&key).is_some_and(Value::is_object);
        if !nested {
            target.insert(key, value);
        } else if let Some(existing) = target.get_mut(&key) {
            merge(existing, value);
        }
    }
}

/// Owned variant of [`merge`].
pub fn merged(mut base: Value, overrides: Value) -> Value {
    merge(&mut base, overrides);
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_keys_are_merged() {
        let base = json!({"invoice": {"status": 100, "contact": {"id": 1, "objectName": "Contact"}}});
        let result = merged(base, json!({"invoice": {"contact": {"id": 2}}}));
        assert_eq!(
            result,
            json!({"invoice": {"status": 100, "contact": {"id": 2, "objectName": "Contact"}}})
        );
    }

    #[test]
    fn scalar_replaces_object() {
        let result = merged(json!({"a": {"b": 1}}), json!({"a": "flat"}));
        assert_eq!(result, json!({"a": "flat"}));
    }

    #[test]
    fn object_replaces_scalar() {
        let result = merged(json!({"a": 1}), json!({"a": {"b": 2}}));
        assert_eq!(result, json!({"a": {"b": 2}}));
    }

    #[test]
    fn lists_are_replaced_not_appended() {
        let base = json!({"items": [{"name": "A"}, {"name": "B"}]});
        let result = merged(base, json!({"items": [{"name": "C"}]}));
        assert_eq!(result, json!({"items": [{"name": "C"}]}));
    }

    #[test]
    fn empty_list_override_clears() {
        let result = merged(json!({"items": [1, 2, 3]}), json!({"items": []}));
        assert_eq!(result, json!({"items": []}));
    }

    #[test]
    fn null_override_wins() {
        let result = merged(json!({"text": "hello"}), json!({"text": null}));
        assert_eq!(result, json!({"text": null}));
    }

    #[test]
    fn new_keys_are_added() {
        let result = merged(json!({"a": 1}), json!({"b": 2}));
        assert_eq!(result, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn empty_override_is_identity() {
        let base = json!({"a": {"b": [1, 2]}, "c": "d"});
        assert_eq!(merged(base.clone(), json!({})), base);
    }
}
