//! Bracket-notation encoding of nested parameters.

use serde_json::{Map, Value};

/// Flatten nested parameters into `key[sub][0]=value` pairs.
///
/// This is the form sevdesk reads both from query strings and from
/// `application/x-www-form-urlencoded` bodies. Booleans become `1`/`0`,
/// `null` entries are left out and empty containers produce no pair.
pub fn flatten(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push(&mut pairs, key.clone(), value);
    }
    pairs
}

fn push(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((key, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(entries) => {
            for (index, entry) in entries.iter().enumerate() {
                push(pairs, format!("{key}[{index}]"), entry);
            }
        }
        Value::Object(map) => {
            for (sub, entry) in map {
                push(pairs, format!("{key}[{sub}]"), entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn scalars() {
        let pairs = flatten(&map(json!({"depth": 0, "city": "Berlin", "countAll": true})));
        assert!(pairs.contains(&pair("depth", "0")));
        assert!(pairs.contains(&pair("city", "Berlin")));
        assert!(pairs.contains(&pair("countAll", "1")));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn nested_reference() {
        let pairs = flatten(&map(json!({"contact": {"id": 5, "objectName": "Contact"}})));
        assert_eq!(
            pairs,
            vec![pair("contact[id]", "5"), pair("contact[objectName]", "Contact")]
        );
    }

    #[test]
    fn lists_are_indexed() {
        let pairs = flatten(&map(json!({
            "invoicePosSave": [
                {"name": "A", "unity": {"id": 1}},
                {"name": "B"}
            ]
        })));
        assert_eq!(
            pairs,
            vec![
                pair("invoicePosSave[0][name]", "A"),
                pair("invoicePosSave[0][unity][id]", "1"),
                pair("invoicePosSave[1][name]", "B"),
            ]
        );
    }

    #[test]
    fn nulls_and_empty_containers_vanish() {
        let pairs = flatten(&map(json!({"a": null, "b": [], "c": {}, "d": false})));
        assert_eq!(pairs, vec![pair("d", "0")]);
    }
}
