//! Constants and helpers shared by the XML writer and reader.
//!
//! Everything here is part of the mapping convention, so the encoder and
//! the decoder must agree on it.

use serde_json::{Map, Number, Value};

/// Synthetic tag / key standing for "this element repeats".
pub const ARRAY_KEY: &str = "array";

/// Key holding the text content of an element that also has children
/// or attributes.
pub const CONTENT_KEY: &str = "content";

/// Adds a member to an object, turning repeated keys into an array.
///
/// The first occurrence is stored as-is (an array value is wrapped so that
/// later occurrences append next to it instead of into it); the second
/// occurrence converts the member into an array of both; later occurrences
/// are appended.
pub fn accumulate(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        None => {
            let value = if value.is_array() {
                Value::Array(vec![value])
            } else {
                value
            };
            map.insert(key, value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// Converts element or attribute text into a JSON scalar.
///
/// `true` / `false` / `null` (ASCII case-insensitive) and plain decimal
/// numbers are coerced; anything else, including numbers with leading
/// zeros and integers wider than 64 bits, stays a string.
pub fn string_to_value(text: &str) -> Value {
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if text.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    match parse_number(text) {
        Some(number) => Value::Number(number),
        None => Value::String(text.to_string()),
    }
}

fn parse_number(text: &str) -> Option<Number> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let bytes = unsigned.as_bytes();
    if !bytes.first()?.is_ascii_digit() {
        return None;
    }
    // "007" would come back as 7
    if bytes[0] == b'0' && bytes.get(1).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    if !bytes
        .iter()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }

    if bytes.iter().all(u8::is_ascii_digit) {
        if let Ok(i) = text.parse::<i64>() {
            return Some(i.into());
        }
        return text.parse::<u64>().ok().map(Number::from);
    }

    let f = text.parse::<f64>().ok()?;
    Number::from_f64(f)
}

/// Renders a JSON scalar as element text.
///
/// Returns `None` for containers.
pub fn scalar_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(bool_to_string(*b).to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Converts a Rust boolean to its string representation for XML.
pub fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Checks a tag name against the XML `Name` production.
///
/// Non-ASCII letters and digits are accepted; a colon is allowed so that
/// prefixed names pass through untouched.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_name_start_char(c) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(c: char) -> bool {
    c == '_' || c == ':' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c == '-' || c == '.' || c == '\u{B7}' || c.is_numeric()
}

/// Checks if an attribute is a namespace declaration.
pub fn is_namespace_declaration(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}
