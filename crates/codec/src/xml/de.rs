//! XML text to JSON tree.
//!
//! Reads quick-xml events and builds the raw JSON object of the mapping
//! convention. The result may still contain synthetic `array` members;
//! flattening them is the job of [`crate::normalize`].

use crate::config::CodecOptions;
use crate::error::{CodecError, Result};
use crate::xml::utils::{self, CONTENT_KEY};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

/// Parse an XML fragment into the raw JSON object of the convention.
///
/// Every top-level element becomes a member of the returned object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xrd_codec::CodecOptions;
/// use xrd_codec::xml::from_xml_str;
///
/// let raw = from_xml_str("<key1>value1</key1><key2>2</key2>", &CodecOptions::default()).unwrap();
/// assert_eq!(serde_json::Value::Object(raw), json!({"key1": "value1", "key2": 2}));
/// ```
pub fn from_xml_str(xml: &str, options: &CodecOptions) -> Result<Map<String, Value>> {
    let mut deserializer = XmlDeserializer::new(Reader::from_str(xml), options);
    deserializer.read_document()
}

/// Parse XML bytes into the raw JSON object of the convention.
pub fn from_xml_slice(xml: &[u8], options: &CodecOptions) -> Result<Map<String, Value>> {
    let xml_str = std::str::from_utf8(xml)
        .map_err(|e| CodecError::Xml(format!("Invalid UTF-8: {}", e)))?;
    from_xml_str(xml_str, options)
}

/// Text collected between two element boundaries.
#[derive(Debug, Default)]
struct TextRun {
    text: String,
    /// Set when part of the run came from CDATA, which is never coerced.
    verbatim: bool,
}

impl TextRun {
    fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn push_verbatim(&mut self, text: &str) {
        self.text.push_str(text);
        self.verbatim = true;
    }

    /// Takes the trimmed run as a JSON value, or `None` when it is blank.
    fn take(&mut self, keep_strings: bool) -> Option<Value> {
        let run = std::mem::take(self);
        let trimmed = run.text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if run.verbatim || keep_strings {
            Some(Value::String(trimmed.to_string()))
        } else {
            Some(utils::string_to_value(trimmed))
        }
    }
}

/// XML reader that builds the convention's JSON object.
struct XmlDeserializer<'a, 'o> {
    reader: Reader<&'a [u8]>,
    options: &'o CodecOptions,
    depth: usize,
}

impl<'a, 'o> XmlDeserializer<'a, 'o> {
    fn new(reader: Reader<&'a [u8]>, options: &'o CodecOptions) -> Self {
        Self {
            reader,
            options,
            depth: 0,
        }
    }

    fn next_event(&mut self) -> Result<Event<'a>> {
        self.reader
            .read_event()
            .map_err(|e| CodecError::Xml(format!("XML parse error: {}", e)))
    }

    /// Reads all top-level elements into one object.
    ///
    /// Declarations, comments, processing instructions, doctypes and text
    /// outside of elements are skipped.
    fn read_document(&mut self) -> Result<Map<String, Value>> {
        let mut root = Map::new();
        let mut elements = 0usize;
        loop {
            match self.next_event()? {
                Event::Start(start) => {
                    let (name, members) = self.open_element(&start)?;
                    let value = self.read_element(&name, members)?;
                    utils::accumulate(&mut root, name, value);
                    elements += 1;
                }
                Event::Empty(start) => {
                    let (name, members) = self.open_element(&start)?;
                    let value = self.finish_element(members, TextRun::default());
                    utils::accumulate(&mut root, name, value);
                    elements += 1;
                }
                Event::End(end) => {
                    return Err(CodecError::Xml(format!(
                        "Unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    )));
                }
                Event::Eof => break,
                _ => {}
            }
        }
        if elements == 0 {
            return Err(CodecError::Structure(
                "XML document contains no elements".to_string(),
            ));
        }
        Ok(root)
    }

    /// Reads the content of an element up to its end tag.
    fn read_element(&mut self, name: &str, mut members: Map<String, Value>) -> Result<Value> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(CodecError::Structure(format!(
                "document nesting exceeds the maximum depth of {}",
                self.options.max_depth
            )));
        }

        let mut text = TextRun::default();
        loop {
            match self.next_event()? {
                Event::Start(start) => {
                    self.flush_content(&mut text, &mut members);
                    let (child, child_members) = self.open_element(&start)?;
                    let value = self.read_element(&child, child_members)?;
                    utils::accumulate(&mut members, child, value);
                }
                Event::Empty(start) => {
                    self.flush_content(&mut text, &mut members);
                    let (child, child_members) = self.open_element(&start)?;
                    let value = self.finish_element(child_members, TextRun::default());
                    utils::accumulate(&mut members, child, value);
                }
                Event::Text(t) => {
                    let raw = String::from_utf8_lossy(t.as_ref());
                    let unescaped = unescape(&raw).map_err(|e| {
                        CodecError::Xml(format!("Invalid text in <{}>: {}", name, e))
                    })?;
                    text.push(&unescaped);
                }
                Event::GeneralRef(r) => {
                    let reference = format!("&{};", String::from_utf8_lossy(r.as_ref()));
                    let resolved = unescape(&reference).map_err(|e| {
                        CodecError::Xml(format!("Unresolved reference in <{}>: {}", name, e))
                    })?;
                    text.push(&resolved);
                }
                Event::CData(c) => {
                    text.push_verbatim(&String::from_utf8_lossy(c.as_ref()));
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(CodecError::Structure(format!(
                        "Unexpected EOF inside <{}>",
                        name
                    )));
                }
                _ => {}
            }
        }

        self.depth -= 1;
        Ok(self.finish_element(members, text))
    }

    /// Extracts the tag name and the attribute members of a start tag.
    fn open_element(&self, start: &BytesStart) -> Result<(String, Map<String, Value>)> {
        let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut members = Map::new();
        for attr in start.attributes() {
            let attr = attr
                .map_err(|e| CodecError::Xml(format!("Failed to parse attribute: {}", e)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            // Skip xmlns namespace declarations
            if utils::is_namespace_declaration(&key) {
                continue;
            }
            let raw = String::from_utf8_lossy(&attr.value);
            let value = unescape(&raw)
                .map_err(|e| CodecError::Xml(format!("Invalid attribute value: {}", e)))?;
            utils::accumulate(&mut members, key, self.scalar(&value));
        }
        Ok((name, members))
    }

    /// Moves pending text into the `content` member.
    fn flush_content(&self, text: &mut TextRun, members: &mut Map<String, Value>) {
        if let Some(value) = text.take(self.options.keep_strings) {
            utils::accumulate(members, CONTENT_KEY.to_string(), value);
        }
    }

    /// Builds the JSON value of a closed element.
    ///
    /// A bare element yields its coerced text (or `""`); an element with
    /// attributes or children yields an object, text going to `content`.
    fn finish_element(&self, mut members: Map<String, Value>, mut text: TextRun) -> Value {
        if members.is_empty() {
            return text
                .take(self.options.keep_strings)
                .unwrap_or_else(|| Value::String(String::new()));
        }
        self.flush_content(&mut text, &mut members);
        Value::Object(members)
    }

    fn scalar(&self, text: &str) -> Value {
        if self.options.keep_strings {
            Value::String(text.to_string())
        } else {
            utils::string_to_value(text)
        }
    }
}
