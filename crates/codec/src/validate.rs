//! Key validation for JSON input to the encoder.
//!
//! Two kinds of keys cannot survive a trip through XML and back:
//!
//! - `array`, which the decoder reads as "repeated element". It is always
//!   rejected at the root, and below the root unless
//!   [`CodecOptions::allow_nested_array_key`] is set.
//! - keys already starting with `__at__`, which the decoder would turn into
//!   `@` keys.
//!
//! A root object also cannot carry a `content` member: it would be written
//! as text with no enclosing element.

use crate::config::CodecOptions;
use crate::error::{CodecError, Result};
use crate::escape;
use crate::xml::{ARRAY_KEY, CONTENT_KEY};
use serde_json::Value;

/// Checks every key of a JSON document before it is encoded.
pub fn validate_keys(value: &Value, options: &CodecOptions) -> Result<()> {
    if let Value::Object(map) = value {
        if map.contains_key(ARRAY_KEY) {
            return Err(CodecError::ReservedKey {
                path: format!("$.{ARRAY_KEY}"),
            });
        }
        if map.contains_key(CONTENT_KEY) {
            return Err(CodecError::Structure(format!(
                "\"{CONTENT_KEY}\" at $.{CONTENT_KEY} has no enclosing element"
            )));
        }
    }
    walk(value, "$", options)
}

fn walk(value: &Value, path: &str, options: &CodecOptions) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = format!("{path}.{key}");
                if key == ARRAY_KEY && !options.allow_nested_array_key {
                    return Err(CodecError::ReservedKey { path: child_path });
                }
                if escape::is_escaped(key) {
                    return Err(CodecError::EscapeCollision { key: key.clone() });
                }
                walk(child, &child_path, options)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                walk(item, &format!("{path}[{index}]"), options)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
