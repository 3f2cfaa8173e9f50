//! JSON tree to XML text.
//!
//! Walks a `serde_json::Value` and writes quick-xml events following the
//! mapping convention described in [`crate::xml`]. Keys starting with `@`
//! are written in escaped form; every emitted tag is checked against the
//! XML name rules.

use crate::config::CodecOptions;
use crate::error::{CodecError, Result};
use crate::escape;
use crate::xml::utils::{self, ARRAY_KEY, CONTENT_KEY};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::{Map, Value};
use std::io::Write;

/// Serialize a JSON tree to an XML string.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xrd_codec::CodecOptions;
/// use xrd_codec::xml::to_xml_string;
///
/// let value = json!({"serviceCode": "testService", "xRoadInstance": "FI"});
/// let xml = to_xml_string(&value, &CodecOptions::default()).unwrap();
/// assert_eq!(
///     xml,
///     "<serviceCode>testService</serviceCode><xRoadInstance>FI</xRoadInstance>"
/// );
/// ```
pub fn to_xml_string(value: &Value, options: &CodecOptions) -> Result<String> {
    let buffer = to_xml_vec(value, options)?;
    String::from_utf8(buffer).map_err(|e| CodecError::Xml(format!("Invalid UTF-8: {}", e)))
}

/// Serialize a JSON tree to an XML byte vector.
pub fn to_xml_vec(value: &Value, options: &CodecOptions) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(value, options, &mut buffer)?;
    Ok(buffer)
}

/// Serialize a JSON tree to an XML writer.
pub fn to_xml_writer<W: Write>(value: &Value, options: &CodecOptions, writer: W) -> Result<()> {
    let mut serializer = XmlSerializer::new(writer, options);
    serializer.write_document(value)
}

/// Writes the convention's XML events for a JSON tree.
pub struct XmlSerializer<'o, W: Write> {
    writer: Writer<W>,
    options: &'o CodecOptions,
    depth: usize,
}

impl<'o, W: Write> XmlSerializer<'o, W> {
    /// Creates a new XML serializer.
    pub fn new(writer: W, options: &'o CodecOptions) -> Self {
        Self {
            writer: Writer::new(writer),
            options,
            depth: 0,
        }
    }

    /// Writes a whole document.
    ///
    /// An object root writes its members without a wrapper element; an
    /// array root writes every item as a synthetic `<array>` element.
    pub fn write_document(&mut self, value: &Value) -> Result<()> {
        if self.options.xml_declaration {
            self.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        match value {
            Value::Object(map) if map.contains_key(CONTENT_KEY) => Err(CodecError::Structure(
                format!("\"{CONTENT_KEY}\" at $.{CONTENT_KEY} has no enclosing element"),
            )),
            Value::Object(map) => self.write_members(map),
            Value::Array(items) => self.write_repeated(ARRAY_KEY, items),
            other => Err(CodecError::UnsupportedRoot(crate::json::kind_of(other))),
        }
    }

    /// Writes the members of an object as sibling elements.
    fn write_members(&mut self, map: &Map<String, Value>) -> Result<()> {
        for (key, value) in map {
            if key == CONTENT_KEY {
                self.write_content(value)?;
                continue;
            }
            let name = escape::escape_key(key);
            self.write_value(&name, value)?;
        }
        Ok(())
    }

    /// Writes every item under the same tag name.
    ///
    /// An item that is itself an array is wrapped in `<name>` and its own
    /// items repeat as `<array>`, at any depth.
    fn write_repeated(&mut self, name: &str, items: &[Value]) -> Result<()> {
        for item in items {
            match item {
                Value::Array(inner) => {
                    self.enter()?;
                    self.write_start_element(name)?;
                    self.write_repeated(ARRAY_KEY, inner)?;
                    self.write_end_element(name)?;
                    self.leave();
                }
                _ => self.write_value(name, item)?,
            }
        }
        Ok(())
    }

    /// Writes one value under the given tag name.
    fn write_value(&mut self, name: &str, value: &Value) -> Result<()> {
        match value {
            Value::Object(map) => {
                self.enter()?;
                self.write_start_element(name)?;
                self.write_members(map)?;
                self.write_end_element(name)?;
                self.leave();
                Ok(())
            }
            Value::Array(items) => self.write_repeated(name, items),
            Value::String(s) if s.is_empty() => {
                self.enter()?;
                self.write_empty_element(name)?;
                self.leave();
                Ok(())
            }
            scalar => {
                let text = utils::scalar_to_text(scalar).unwrap_or_default();
                self.enter()?;
                self.write_text_element(name, &text)?;
                self.leave();
                Ok(())
            }
        }
    }

    /// Writes the text of a `content` member.
    fn write_content(&mut self, value: &Value) -> Result<()> {
        let text = match value {
            Value::Array(items) => items
                .iter()
                .filter_map(utils::scalar_to_text)
                .collect::<Vec<_>>()
                .join("\n"),
            other => utils::scalar_to_text(other).unwrap_or_default(),
        };
        if text.is_empty() {
            return Ok(());
        }
        self.write_event(Event::Text(BytesText::new(&text)))
    }

    /// Writes `<name>text</name>`.
    fn write_text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.write_start_element(name)?;
        self.write_event(Event::Text(BytesText::new(text)))?;
        self.write_end_element(name)
    }

    /// Writes `<name/>`.
    fn write_empty_element(&mut self, name: &str) -> Result<()> {
        check_name(name)?;
        self.write_event(Event::Empty(BytesStart::new(name)))
    }

    /// Writes the start of an element.
    fn write_start_element(&mut self, name: &str) -> Result<()> {
        check_name(name)?;
        self.write_event(Event::Start(BytesStart::new(name)))
    }

    /// Writes the end of an element.
    fn write_end_element(&mut self, name: &str) -> Result<()> {
        self.write_event(Event::End(BytesEnd::new(name)))
    }

    fn write_event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| CodecError::Xml(format!("Failed to write XML: {}", e)))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(CodecError::Structure(format!(
                "document nesting exceeds the maximum depth of {}",
                self.options.max_depth
            )));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

fn check_name(name: &str) -> Result<()> {
    if utils::is_valid_element_name(name) {
        Ok(())
    } else {
        Err(CodecError::InvalidElementName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_xml(value: Value) -> String {
        to_xml_string(&value, &CodecOptions::default()).unwrap()
    }

    #[test]
    fn test_flat_object() {
        assert_eq!(
            to_xml(json!({"key1": "value1", "key2": 2, "key3": true})),
            "<key1>value1</key1><key2>2</key2><key3>true</key3>"
        );
    }

    #[test]
    fn test_nested_object() {
        assert_eq!(
            to_xml(json!({"request": {"key1": "value1"}})),
            "<request><key1>value1</key1></request>"
        );
    }

    #[test]
    fn test_array_member_repeats_tag() {
        assert_eq!(
            to_xml(json!({"menuitem": [{"value": "New"}, {"value": "Open"}]})),
            "<menuitem><value>New</value></menuitem><menuitem><value>Open</value></menuitem>"
        );
    }

    #[test]
    fn test_root_array_uses_synthetic_tag() {
        assert_eq!(
            to_xml(json!([{"id": 48}, {"id": 91}])),
            "<array><id>48</id></array><array><id>91</id></array>"
        );
    }

    #[test]
    fn test_array_of_arrays() {
        assert_eq!(
            to_xml(json!({"DATA": [["one", "two"]]})),
            "<DATA><array>one</array><array>two</array></DATA>"
        );
    }

    #[test]
    fn test_root_array_of_arrays() {
        assert_eq!(
            to_xml(json!([[1, 2], [3]])),
            "<array><array>1</array><array>2</array></array><array><array>3</array></array>"
        );
    }

    #[test]
    fn test_deeply_nested_arrays() {
        assert_eq!(
            to_xml(json!({"a": [[[1, 2]]]})),
            "<a><array><array>1</array><array>2</array></array></a>"
        );
    }

    #[test]
    fn test_root_content_is_an_error() {
        for value in [json!({"content": "hello"}), json!({"a": 1, "content": "x"})] {
            let err = to_xml_string(&value, &CodecOptions::default()).unwrap_err();
            assert!(matches!(err, CodecError::Structure(_)), "{value}");
        }
    }

    #[test]
    fn test_empty_string_and_null() {
        assert_eq!(
            to_xml(json!({"empty": "", "missing": null})),
            "<empty/><missing>null</missing>"
        );
    }

    #[test]
    fn test_empty_object_and_array() {
        assert_eq!(to_xml(json!({"obj": {}, "list": []})), "<obj></obj>");
    }

    #[test]
    fn test_content_member_is_text() {
        assert_eq!(
            to_xml(json!({"name": {"lang": "fi", "content": "Espoo"}})),
            "<name><lang>fi</lang>Espoo</name>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = to_xml(json!({"q": "a < b & c"}));
        assert!(xml.contains("a &lt; b &amp; c"), "{xml}");
    }

    #[test]
    fn test_sigil_keys_are_escaped() {
        assert_eq!(
            to_xml(json!({"@type": "Person", "email": "john@example.com"})),
            "<__at__type>Person</__at__type><email>john@example.com</email>"
        );
    }

    #[test]
    fn test_invalid_element_name() {
        let err = to_xml_string(&json!({"two words": 1}), &CodecOptions::default()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidElementName(name) if name == "two words"));
    }

    #[test]
    fn test_xml_declaration() {
        let options = CodecOptions {
            xml_declaration: true,
            ..Default::default()
        };
        let xml = to_xml_string(&json!({"a": 1}), &options).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.ends_with("<a>1</a>"));
    }

    #[test]
    fn test_max_depth() {
        let options = CodecOptions {
            max_depth: 2,
            ..Default::default()
        };
        assert!(to_xml_string(&json!({"a": {"b": 1}}), &options).is_ok());
        let err = to_xml_string(&json!({"a": {"b": {"c": {"d": 1}}}}), &options).unwrap_err();
        assert!(matches!(err, CodecError::Structure(_)));
    }
}
