//! Property-based tests for the override merge and line item handling.
//!
//! Run with: `cargo test --test proptest_tests`

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use sevdesk::core::*;

/// Arbitrary JSON trees a few levels deep.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z0-9 ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_map() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-d]", arb_json(), 0..5).prop_map(|m| m.into_iter().collect())
}

/// Path of single-letter keys down to a leaf.
fn arb_path() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d]", 1..4)
}

fn nest(path: &[String], leaf: Value) -> Value {
    path.iter()
        .rev()
        .fold(leaf, |acc, key| json!({ key.as_str(): acc }))
}

fn lookup<'a>(value: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(key.as_str()))
}

proptest! {
    #[test]
    fn merge_with_empty_override_is_identity(base in arb_map()) {
        let mut merged = base.clone();
        merge_maps(&mut merged, Map::new());
        prop_assert_eq!(merged, base);
    }

    #[test]
    fn merge_into_empty_base_yields_override(over in arb_map()) {
        let mut merged = Map::new();
        merge_maps(&mut merged, over.clone());
        prop_assert_eq!(merged, over);
    }

    #[test]
    fn override_wins_at_any_depth(base in arb_json(), path in arb_path(), leaf in "[a-z]{1,6}") {
        let leaf = Value::String(leaf);
        let out = merged(base, nest(&path, leaf.clone()));
        prop_assert_eq!(lookup(&out, &path), Some(&leaf));
    }

    #[test]
    fn base_keys_survive_unless_overridden(base in arb_map(), over in arb_map()) {
        let mut out = base.clone();
        merge_maps(&mut out, over.clone());
        for (key, value) in &base {
            if !over.contains_key(key) {
                prop_assert_eq!(out.get(key), Some(value));
            }
        }
        for key in over.keys() {
            prop_assert!(out.contains_key(key));
        }
    }

    #[test]
    fn lists_are_replaced_whole(
        base in prop::collection::vec(arb_json(), 0..5),
        over in prop::collection::vec(arb_json(), 0..5),
    ) {
        let out = merged(json!({"items": base}), json!({"items": over.clone()}));
        prop_assert_eq!(&out["items"], &Value::Array(over));
    }

    #[test]
    fn merge_is_idempotent(base in arb_map(), over in arb_map()) {
        let mut once = base.clone();
        merge_maps(&mut once, over.clone());
        let mut twice = once.clone();
        merge_maps(&mut twice, over);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prices_survive_normalization(cents in 0i64..10_000_000, qty in 1u32..1000) {
        let price = Decimal::new(cents, 2);
        let defaults = DocumentDefaults {
            tax_rate: Decimal::from(19),
            tax_text: "Umsatzsteuer 19%".into(),
            tax_type: "default".into(),
            invoice_type: Some("RE".into()),
            currency: "EUR".into(),
            sev_user_id: 1,
        };
        let raw = json!({"name": "X", "price": price.to_string(), "quantity": qty});
        let items = normalize_items(&[raw], &defaults, DocumentKind::Invoice).unwrap();
        prop_assert_eq!(items[0].price, price);
        prop_assert_eq!(items[0].quantity, Decimal::from(qty));

        let wire = items[0].to_wire(DocumentKind::Invoice);
        prop_assert_eq!(&wire["price"], &Value::String(price.to_string()));
    }
}
