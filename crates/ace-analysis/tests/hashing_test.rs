use ace_analysis::hashing::{canonicalize, hash_object};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn object(pairs: &[(String, i64)]) -> Value {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert(k.clone(), Value::from(*v));
    }
    Value::Object(map)
}

/// Same members written as JSON text in the given key order.
fn object_text(pairs: &[(String, i64)]) -> String {
    let members: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{}:{}", Value::from(k.as_str()), v))
        .collect();
    format!("{{{}}}", members.join(","))
}

proptest! {
    #[test]
    fn hash_ignores_key_order(pairs in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..12)) {
        let forward: Vec<(String, i64)> = pairs.into_iter().collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let a: Value = serde_json::from_str(&object_text(&forward)).unwrap();
        let b: Value = serde_json::from_str(&object_text(&reversed)).unwrap();
        prop_assert_eq!(hash_object(&a, false), hash_object(&b, false));
        prop_assert_eq!(hash_object(&object(&forward), true), hash_object(&object(&reversed), true));
    }

    #[test]
    fn nested_key_order_is_ignored(pairs in prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 1..8)) {
        let forward: Vec<(String, i64)> = pairs.into_iter().collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = serde_json::json!({"outer": [object(&forward)], "hash": "x"});
        let b = serde_json::json!({"hash": "y", "outer": [object(&reversed)]});
        prop_assert_eq!(hash_object(&a, true), hash_object(&b, true));
        prop_assert_ne!(hash_object(&a, false), hash_object(&b, false));
    }

    #[test]
    fn canonicalize_is_idempotent(pairs in prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 0..8)) {
        let forward: Vec<(String, i64)> = pairs.into_iter().collect();
        let once = canonicalize(&object(&forward));
        prop_assert_eq!(canonicalize(&once), once);
    }

    #[test]
    fn hash_is_lowercase_hex(s in ".{0,64}") {
        let hash = hash_object(&Value::from(s), false);
        prop_assert_eq!(hash.len(), 64);
        prop_assert!(hash.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
