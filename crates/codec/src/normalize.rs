//! Flattening of synthetic `array` wrappers.
//!
//! The raw object read from XML represents a repeated `<array>` element as
//! an object with a single `array` member. This module replaces every such
//! wrapper, at any depth and also at the root, with the JSON array itself.
//!
//! | raw | normalized |
//! |-----|------------|
//! | `{"array": [a, b]}` at the root | `[a, b]` |
//! | `{"array": ""}` at the root (`<array/>`) | `[]` |
//! | `{"DATA": {"array": ["one", "two"]}}` | `{"DATA": ["one", "two"]}` |
//! | `{"DATA": {"array": "one"}}` | `{"DATA": ["one"]}` |
//!
//! A wrapper that carries other members next to `array` cannot be
//! flattened without losing them and is reported as an error.

use crate::error::{CodecError, Result};
use crate::xml::ARRAY_KEY;
use serde_json::{Map, Value};
use tracing::debug;

/// Normalizes the raw decoded object.
///
/// Returns an array when the whole document was a root array, an object
/// otherwise.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xrd_codec::normalize::normalize;
///
/// let raw = json!({"DATA": {"array": ["one", "two", "three"]}});
/// let serde_json::Value::Object(raw) = raw else { unreachable!() };
/// assert_eq!(normalize(raw).unwrap(), json!({"DATA": ["one", "two", "three"]}));
/// ```
pub fn normalize(root: Map<String, Value>) -> Result<Value> {
    normalize_value(Value::Object(root), "$")
}

fn normalize_value(value: Value, path: &str) -> Result<Value> {
    match value {
        Value::Object(map) if map.contains_key(ARRAY_KEY) => {
            if map.len() != 1 {
                return Err(CodecError::Structure(format!(
                    "cannot flatten \"{}\" at {}: it has {} other member(s)",
                    ARRAY_KEY,
                    path,
                    map.len() - 1
                )));
            }
            debug!(path, "collapsing synthetic array wrapper");
            let items = map.into_iter().flat_map(|(_, v)| into_items(v));
            normalize_items(items, path)
        }
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                let child_path = format!("{path}.{key}");
                out.insert(key, normalize_value(child, &child_path)?);
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => normalize_items(items.into_iter(), path),
        scalar => Ok(scalar),
    }
}

fn normalize_items(items: impl Iterator<Item = Value>, path: &str) -> Result<Value> {
    items
        .enumerate()
        .map(|(index, item)| normalize_value(item, &format!("{path}[{index}]")))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

/// Items of a synthetic `array` member.
///
/// An empty element stands for zero repeats, a single value for one.
fn into_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::String(s) if s.is_empty() => Vec::new(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn norm(value: Value) -> Result<Value> {
        match value {
            Value::Object(map) => normalize(map),
            other => panic!("test input must be an object, got {other}"),
        }
    }

    #[test]
    fn test_root_array_unwrapped() {
        assert_eq!(
            norm(json!({"array": [{"id": 48}, {"id": 91}]})).unwrap(),
            json!([{"id": 48}, {"id": 91}])
        );
    }

    #[test]
    fn test_root_empty_array() {
        assert_eq!(norm(json!({"array": ""})).unwrap(), json!([]));
    }

    #[test]
    fn test_root_single_item() {
        assert_eq!(norm(json!({"array": {"id": 1}})).unwrap(), json!([{"id": 1}]));
    }

    #[test]
    fn test_root_mixed_with_other_members_fails() {
        let err = norm(json!({"array": [1, 2], "other": 3})).unwrap_err();
        assert!(matches!(err, CodecError::Structure(msg) if msg.contains("at $")));
    }

    #[test]
    fn test_nested_wrapper_flattened() {
        assert_eq!(
            norm(json!({
                "DATA1": {"array": ["one", "two", "three"]},
                "DATA2": {"array": [1, 2, 3]}
            }))
            .unwrap(),
            json!({"DATA1": ["one", "two", "three"], "DATA2": [1, 2, 3]})
        );
    }

    #[test]
    fn test_deep_wrapper_flattened() {
        assert_eq!(
            norm(json!({
                "DATA": {"array": ["one", "two", "three"]},
                "DEEPDATA": {"realm": {"array": [1, 2, 3]}}
            }))
            .unwrap(),
            json!({"DATA": ["one", "two", "three"], "DEEPDATA": {"realm": [1, 2, 3]}})
        );
    }

    #[test]
    fn test_wrappers_inside_arrays_flattened() {
        assert_eq!(
            norm(json!({"rows": [{"cells": {"array": [1, 2]}}, {"cells": {"array": [3]}}]}))
                .unwrap(),
            json!({"rows": [{"cells": [1, 2]}, {"cells": [3]}]})
        );
    }

    #[test]
    fn test_nested_wrappers_inside_wrapper_items() {
        assert_eq!(
            norm(json!({"array": [{"array": [1, 2]}, {"array": [3, 4]}]})).unwrap(),
            json!([[1, 2], [3, 4]])
        );
    }

    #[test]
    fn test_single_item_wrapper() {
        assert_eq!(
            norm(json!({"DATA": {"array": "one"}})).unwrap(),
            json!({"DATA": ["one"]})
        );
    }

    #[test]
    fn test_nested_mixed_wrapper_fails_with_path() {
        let err = norm(json!({"a": {"b": {"array": [1], "id": 7}}})).unwrap_err();
        assert!(matches!(err, CodecError::Structure(msg) if msg.contains("$.a.b")));
    }

    #[test]
    fn test_plain_objects_untouched() {
        let value = json!({"request": {"key1": "value1", "key2": [true, false]}});
        assert_eq!(norm(value.clone()).unwrap(), value);
    }
}
