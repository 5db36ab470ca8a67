//! JSON merge rules for combining run data
//!
//! Incoming values win at the leaves, nested objects are merged key by key,
//! and replacing an object with a non-object is rejected. The base value is
//! never modified; callers receive a fresh value or an error.

use serde_json::{Map, Value};

/// Errors produced when combining run results
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeError {
    #[error("cannot merge {incoming} into {base} at {path}")]
    Incompatible {
        path: String,
        base: &'static str,
        incoming: &'static str,
    },

    #[error("cannot merge result for run {found} into run {expected}")]
    RunIdMismatch { expected: String, found: String },
}

/// Merge `incoming` into a copy of `base`.
///
/// | base \ incoming | null | object    | other |
/// |-----------------|------|-----------|-------|
/// | null            | base | incoming  | error |
/// | object          | base | recursive | error |
/// | other           | error| error     | error |
pub fn merge_data(base: &Value, incoming: &Value) -> Result<Value, MergeError> {
    match (base, incoming) {
        (_, Value::Null) if base.is_null() || base.is_object() => Ok(base.clone()),
        (Value::Null, Value::Object(_)) => Ok(incoming.clone()),
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            let mut merged = base_map.clone();
            merge_into(&mut merged, incoming_map, "")?;
            Ok(Value::Object(merged))
        }
        _ => Err(MergeError::Incompatible {
            path: "<root>".to_string(),
            base: shape(base),
            incoming: shape(incoming),
        }),
    }
}

fn merge_into(
    target: &mut Map<String, Value>,
    incoming: &Map<String, Value>,
    prefix: &str,
) -> Result<(), MergeError> {
    for (key, value) in incoming {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match target.get_mut(key) {
            Some(Value::Object(existing)) => match value {
                Value::Object(nested) => merge_into(existing, nested, &path)?,
                other => {
                    return Err(MergeError::Incompatible {
                        path,
                        base: "object",
                        incoming: shape(other),
                    });
                }
            },
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(())
}

/// Name of a JSON value's shape, for error messages
pub fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disjoint_keys_union() {
        let merged = merge_data(&json!({"value": 5}), &json!({"multiply": 100})).unwrap();
        assert_eq!(merged, json!({"value": 5, "multiply": 100}));
    }

    #[test]
    fn test_incoming_wins_on_shared_key() {
        let merged = merge_data(&json!({"value": 5, "a": "x"}), &json!({"value": 7})).unwrap();
        assert_eq!(merged["value"], 7);
        assert_eq!(merged["a"], "x");
    }

    #[test]
    fn test_nested_objects_merge_recursively() {
        let base = json!({"user": {"name": "Alice", "age": 30}});
        let incoming = json!({"user": {"email": "a@b.c", "age": 31}});
        let merged = merge_data(&base, &incoming).unwrap();
        assert_eq!(
            merged,
            json!({"user": {"name": "Alice", "age": 31, "email": "a@b.c"}})
        );
    }

    #[test]
    fn test_leaf_replaced_by_object() {
        let merged = merge_data(&json!({"x": 1}), &json!({"x": {"y": 2}})).unwrap();
        assert_eq!(merged, json!({"x": {"y": 2}}));
    }

    #[test]
    fn test_non_object_into_object_key_fails() {
        let base = json!({"user": {"name": "Alice"}});
        let err = merge_data(&base, &json!({"user": "bob"})).unwrap_err();
        assert_eq!(
            err,
            MergeError::Incompatible {
                path: "user".to_string(),
                base: "object",
                incoming: "string",
            }
        );
        assert_eq!(base, json!({"user": {"name": "Alice"}}));
    }

    #[test]
    fn test_nested_error_path() {
        let base = json!({"a": {"b": {"c": 1}}});
        let err = merge_data(&base, &json!({"a": {"b": [1, 2]}})).unwrap_err();
        assert!(err.to_string().contains("a.b"));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_null_incoming_keeps_base() {
        let base = json!({"value": 5});
        assert_eq!(merge_data(&base, &Value::Null).unwrap(), base);
        assert_eq!(merge_data(&Value::Null, &Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_null_base_takes_incoming_object() {
        let merged = merge_data(&Value::Null, &json!({"result": 42})).unwrap();
        assert_eq!(merged, json!({"result": 42}));
    }

    #[test]
    fn test_scalar_shapes_rejected() {
        assert!(merge_data(&json!({"a": 1}), &json!([1])).is_err());
        assert!(merge_data(&json!(3), &json!({"a": 1})).is_err());
        assert!(merge_data(&Value::Null, &json!("text")).is_err());
        assert!(merge_data(&json!("text"), &Value::Null).is_err());
    }
}
