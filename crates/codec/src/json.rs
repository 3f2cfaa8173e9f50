//! JSON side of the codec.
//!
//! Thin wrappers around `serde_json` that parse caller input into a
//! [`Value`] tree and render trees back to text. Object key order is
//! preserved in both directions (`preserve_order`).
use crate::error::{CodecError, Result};
use serde_json::Value;

/// Parses a JSON document whose root must be an object or an array.
///
/// # Examples
///
/// ```
/// use xrd_codec::json::parse_document;
///
/// let value = parse_document(r#"{"serviceCode": "testService"}"#).unwrap();
/// assert!(value.is_object());
/// assert!(parse_document("42").is_err());
/// ```
pub fn parse_document(s: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(s)?;
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(CodecError::UnsupportedRoot(kind_of(&other))),
    }
}

/// Serializes a tree to a compact JSON string.
pub fn to_json_string(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Serializes a tree to a pretty-printed JSON string.
pub fn to_json_string_pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serializes a tree, pretty-printed when `pretty` is set.
pub fn render(value: &Value, pretty: bool) -> Result<String> {
    if pretty {
        to_json_string_pretty(value)
    } else {
        to_json_string(value)
    }
}

/// Human-readable name of a JSON value kind, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
