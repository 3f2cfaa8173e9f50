//! The `@` key escape shared by both directions.
//!
//! JSON-LD keys such as `@id` or `@context` start with `@`, which cannot
//! start an XML element name. The encoder emits such keys with the leading
//! `@` replaced by `__at__`; the decoder reverses exactly that substitution
//! on keys, never on string values.
//!
//! A key that really starts with `__at__` is indistinguishable from an
//! escaped one once it is in XML, so the decoder always turns it into `@...`.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// The JSON-LD key sigil.
pub const SIGIL: char = '@';

/// XML-safe replacement for a leading [`SIGIL`].
pub const ESCAPED_SIGIL: &str = "__at__";

/// Replaces a leading `@` with `__at__`.
///
/// ```
/// use xrd_codec::escape::escape_key;
///
/// assert_eq!(escape_key("@type"), "__at__type");
/// assert_eq!(escape_key("name"), "name");
/// assert_eq!(escape_key("e@mail"), "e@mail");
/// ```
pub fn escape_key(key: &str) -> Cow<'_, str> {
    match key.strip_prefix(SIGIL) {
        Some(rest) => Cow::Owned(format!("{ESCAPED_SIGIL}{rest}")),
        None => Cow::Borrowed(key),
    }
}

/// Replaces a leading `__at__` with `@`.
///
/// ```
/// use xrd_codec::escape::unescape_key;
///
/// assert_eq!(unescape_key("__at__id"), "@id");
/// assert_eq!(unescape_key("__at__"), "@");
/// assert_eq!(unescape_key("id__at__"), "id__at__");
/// ```
pub fn unescape_key(key: &str) -> Cow<'_, str> {
    match key.strip_prefix(ESCAPED_SIGIL) {
        Some(rest) => Cow::Owned(format!("{SIGIL}{rest}")),
        None => Cow::Borrowed(key),
    }
}

/// Checks whether a key is in escaped form.
pub fn is_escaped(key: &str) -> bool {
    key.starts_with(ESCAPED_SIGIL)
}

/// Un-escapes every object key in a tree, keeping key order.
///
/// Objects nested in arrays are visited too. String values are left alone.
pub fn unescape_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                let key = if is_escaped(&key) {
                    unescape_key(&key).into_owned()
                } else {
                    key
                };
                out.insert(key, unescape_keys(child));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(unescape_keys).collect()),
        scalar => scalar,
    }
}
