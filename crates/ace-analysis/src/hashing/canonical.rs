//! SHA-256 over recursively key-sorted JSON.

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Name of the top-level field dropped when hashing a signature.
pub const HASH_FIELD: &str = "hash";

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Rebuild `value` with every object's keys sorted. Arrays keep their order.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Hash a JSON value. When `exclude_hash_field` is set, a top-level `hash`
/// key is dropped first; nested `hash` keys are always kept.
pub fn hash_object(value: &Value, exclude_hash_field: bool) -> String {
    let mut canonical = canonicalize(value);
    if exclude_hash_field {
        if let Value::Object(map) = &mut canonical {
            map.remove(HASH_FIELD);
        }
    }
    // Serializing a Value cannot fail: keys are always strings.
    let encoded = serde_json::to_vec(&canonical).unwrap_or_default();
    sha256_hex(&encoded)
}

/// Hash any serializable value through the same canonical form.
pub fn hash_serializable<T: Serialize>(
    value: &T,
    exclude_hash_field: bool,
) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    Ok(hash_object(&value, exclude_hash_field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_order_does_not_change_hash() {
        let a = json!({"b": 1, "a": {"y": [1, 2], "x": null}});
        let b = json!({"a": {"x": null, "y": [1, 2]}, "b": 1});
        assert_eq!(hash_object(&a, false), hash_object(&b, false));
    }

    #[test]
    fn array_order_changes_hash() {
        assert_ne!(
            hash_object(&json!([1, 2]), false),
            hash_object(&json!([2, 1]), false)
        );
    }

    #[test]
    fn only_top_level_hash_is_excluded() {
        let with = json!({"a": 1, "hash": "stale"});
        let without = json!({"a": 1});
        assert_eq!(hash_object(&with, true), hash_object(&without, false));
        assert_ne!(hash_object(&with, false), hash_object(&without, false));

        let nested = json!({"a": {"hash": "kept"}});
        let stripped = json!({"a": {}});
        assert_ne!(hash_object(&nested, true), hash_object(&stripped, true));
    }

    #[test]
    fn digest_is_64_hex_chars() {
        let h = hash_object(&json!({}), false);
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        // SHA-256 of "{}"
        assert_eq!(
            h,
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }
}
