//! The two conversion pipelines and their caller-facing types.
//!
//! - [`json_to_xml`]: parse JSON, validate keys, write XML with escaped `@`
//!   keys.
//! - [`xml_to_json`]: read XML, flatten synthetic arrays, un-escape `@`
//!   keys, render JSON.
//!
//! Both are pure functions. Callers that still speak the plain-string
//! contract (converted text, the `<error>Invalid key "array"</error>`
//! payload, or an empty string) use [`Conversion::into_payload`] or
//! [`Converter::convert_payload`].

use crate::config::CodecOptions;
use crate::error::{CodecError, Result};
use crate::{escape, json, normalize, validate, xml};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, warn};

/// Payload returned by the plain-string contract for a rejected `array` key.
pub const REJECTED_KEY_PAYLOAD: &str = "<error>Invalid key \"array\"</error>";

/// Converts a JSON document (object or array root) to XML.
///
/// # Examples
///
/// ```
/// use xrd_codec::json_to_xml;
///
/// let xml = json_to_xml(r#"{"@type": "Person", "name": "John Lennon"}"#).unwrap();
/// assert_eq!(xml, "<__at__type>Person</__at__type><name>John Lennon</name>");
///
/// let err = json_to_xml(r#"{"array": [1, 2, 3]}"#).unwrap_err();
/// assert!(err.is_rejected_key());
/// ```
pub fn json_to_xml(input: &str) -> Result<String> {
    json_to_xml_with(input, &CodecOptions::default())
}

/// Converts a JSON document to XML with explicit options.
pub fn json_to_xml_with(input: &str, options: &CodecOptions) -> Result<String> {
    debug!(input, "converting JSON to XML");
    let value = json::parse_document(input)?;
    validate::validate_keys(&value, options)?;
    let xml = xml::to_xml_string(&value, options)?;
    debug!(output = %xml, "converted JSON to XML");
    Ok(xml)
}

/// Converts an XML fragment to a JSON document.
///
/// # Examples
///
/// ```
/// use xrd_codec::xml_to_json;
///
/// let json = xml_to_json("<DATA><array>one</array><array>two</array></DATA>").unwrap();
/// assert_eq!(json, r#"{"DATA":["one","two"]}"#);
///
/// let json = xml_to_json("<array><id>48</id></array><array><id>91</id></array>").unwrap();
/// assert_eq!(json, r#"[{"id":48},{"id":91}]"#);
/// ```
pub fn xml_to_json(input: &str) -> Result<String> {
    xml_to_json_with(input, &CodecOptions::default())
}

/// Converts an XML fragment to a JSON document with explicit options.
pub fn xml_to_json_with(input: &str, options: &CodecOptions) -> Result<String> {
    debug!(input, "converting XML to JSON");
    let raw = xml::from_xml_str(input, options)?;
    let normalized = normalize::normalize(raw)?;
    let value = escape::unescape_keys(normalized);
    let output = json::render(&value, options.pretty_json)?;
    debug!(output = %output, "converted XML to JSON");
    Ok(output)
}

/// Outcome of a conversion, for callers that must tell the reserved-key
/// rejection apart from every other failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// The converted document.
    Success(String),
    /// The input used the reserved `array` key.
    RejectedKey,
    /// Any other failure: malformed input, unsupported shape, ...
    ConversionFailed,
}

impl Conversion {
    /// Returns true if the conversion produced a document.
    pub fn is_success(&self) -> bool {
        matches!(self, Conversion::Success(_))
    }

    /// Renders the outcome with the plain-string contract.
    ///
    /// An empty JSON object or array encodes to an empty XML fragment, so
    /// `Success("")` renders exactly like `ConversionFailed`. Callers that
    /// must tell the two apart match on the outcome instead.
    ///
    /// ```
    /// use xrd_codec::{Conversion, REJECTED_KEY_PAYLOAD};
    ///
    /// assert_eq!(Conversion::Success("<a>1</a>".into()).into_payload(), "<a>1</a>");
    /// assert_eq!(Conversion::RejectedKey.into_payload(), REJECTED_KEY_PAYLOAD);
    /// assert_eq!(Conversion::ConversionFailed.into_payload(), "");
    /// assert_eq!(Conversion::Success(String::new()).into_payload(), "");
    /// ```
    pub fn into_payload(self) -> String {
        match self {
            Conversion::Success(document) => document,
            Conversion::RejectedKey => REJECTED_KEY_PAYLOAD.to_string(),
            Conversion::ConversionFailed => String::new(),
        }
    }
}

impl From<Result<String>> for Conversion {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(document) => Conversion::Success(document),
            Err(e) if e.is_rejected_key() => Conversion::RejectedKey,
            Err(_) => Conversion::ConversionFailed,
        }
    }
}

/// Which way a payload is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// REST/JSON payload to be embedded in a SOAP message.
    JsonToXml,
    /// XML payload extracted from a SOAP message, returned as JSON.
    XmlToJson,
}

/// Role of a message passing through the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageRole {
    /// Outbound request from the REST client to the SOAP service.
    Request,
    /// Inbound response from the SOAP service to the REST client.
    Response,
}

impl Direction {
    /// Direction used for a message of the given role.
    pub fn for_role(role: MessageRole) -> Self {
        match role {
            MessageRole::Request => Direction::JsonToXml,
            MessageRole::Response => Direction::XmlToJson,
        }
    }

    /// Guesses the direction from the first non-whitespace character.
    ///
    /// ```
    /// use xrd_codec::Direction;
    ///
    /// assert_eq!(Direction::detect("  {\"a\": 1}"), Some(Direction::JsonToXml));
    /// assert_eq!(Direction::detect("<a>1</a>"), Some(Direction::XmlToJson));
    /// assert_eq!(Direction::detect("a"), None);
    /// ```
    pub fn detect(input: &str) -> Option<Self> {
        match input.trim_start().chars().next()? {
            '{' | '[' => Some(Direction::JsonToXml),
            '<' => Some(Direction::XmlToJson),
            _ => None,
        }
    }

    /// Runs the pipeline for this direction.
    pub fn convert(self, data: &str, options: &CodecOptions) -> Result<String> {
        match self {
            Direction::JsonToXml => json_to_xml_with(data, options),
            Direction::XmlToJson => xml_to_json_with(data, options),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Direction::JsonToXml => "JSON to XML",
            Direction::XmlToJson => "XML to JSON",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::JsonToXml => write!(f, "json-to-xml"),
            Direction::XmlToJson => write!(f, "xml-to-json"),
        }
    }
}

/// A one-directional payload converter.
///
/// Implementations hold no per-call state and can be shared between
/// threads.
pub trait Converter: Send + Sync {
    /// The direction this converter handles.
    fn direction(&self) -> Direction;

    /// Converts one payload.
    fn convert(&self, data: &str) -> Result<String>;

    /// Converts one payload and classifies the outcome, logging failures.
    fn convert_outcome(&self, data: &str) -> Conversion {
        let result = self.convert(data);
        if let Err(e) = &result {
            log_failure(self.direction(), e);
        }
        Conversion::from(result)
    }

    /// Converts one payload with the plain-string contract: the document,
    /// the rejected-key payload, or an empty string. Never fails.
    ///
    /// `{}` and `[]` encode to an empty document and are therefore
    /// indistinguishable from a failure here; use
    /// [`Converter::convert_outcome`] when that matters.
    fn convert_payload(&self, data: &str) -> String {
        self.convert_outcome(data).into_payload()
    }
}

fn log_failure(direction: Direction, e: &CodecError) {
    match e {
        CodecError::ReservedKey { path } => {
            error!(%path, "Data violation: Invalid key \"array\"");
        }
        _ => {
            error!(error = %e, "conversion error");
            warn!(
                "Converting {} failed! An empty string is returned.",
                direction.describe()
            );
        }
    }
}

/// Converts JSON payloads to XML.
#[derive(Debug, Clone, Default)]
pub struct JsonToXml {
    options: CodecOptions,
}

impl JsonToXml {
    /// Creates a converter with the given options.
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }
}

impl Converter for JsonToXml {
    fn direction(&self) -> Direction {
        Direction::JsonToXml
    }

    fn convert(&self, data: &str) -> Result<String> {
        json_to_xml_with(data, &self.options)
    }
}

/// Converts XML payloads to JSON.
#[derive(Debug, Clone, Default)]
pub struct XmlToJson {
    options: CodecOptions,
}

impl XmlToJson {
    /// Creates a converter with the given options.
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }
}

impl Converter for XmlToJson {
    fn direction(&self) -> Direction {
        Direction::XmlToJson
    }

    fn convert(&self, data: &str) -> Result<String> {
        xml_to_json_with(data, &self.options)
    }
}

/// Returns the converter for a direction.
pub fn converter_for(direction: Direction, options: CodecOptions) -> Box<dyn Converter> {
    match direction {
        Direction::JsonToXml => Box::new(JsonToXml::new(options)),
        Direction::XmlToJson => Box::new(XmlToJson::new(options)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_from_result() {
        assert_eq!(
            Conversion::from(Ok("<a>1</a>".to_string())),
            Conversion::Success("<a>1</a>".to_string())
        );
        assert_eq!(
            Conversion::from(Err(CodecError::ReservedKey {
                path: "$.array".to_string()
            })),
            Conversion::RejectedKey
        );
        assert_eq!(
            Conversion::from(Err(CodecError::Xml("boom".to_string()))),
            Conversion::ConversionFailed
        );
    }

    #[test]
    fn test_empty_document_is_a_success() {
        let encoder = JsonToXml::default();
        for input in ["{}", "[]"] {
            assert_eq!(encoder.convert_outcome(input), Conversion::Success(String::new()));
            assert_eq!(encoder.convert_payload(input), "");
        }
    }

    #[test]
    fn test_direction_for_role() {
        assert_eq!(Direction::for_role(MessageRole::Request), Direction::JsonToXml);
        assert_eq!(Direction::for_role(MessageRole::Response), Direction::XmlToJson);
    }

    #[test]
    fn test_direction_detect_edge_cases() {
        assert_eq!(Direction::detect(""), None);
        assert_eq!(Direction::detect("\n\t[1]"), Some(Direction::JsonToXml));
        assert_eq!(Direction::detect("<?xml version=\"1.0\"?><a/>"), Some(Direction::XmlToJson));
    }

    #[test]
    fn test_direction_display_and_serde() {
        assert_eq!(Direction::JsonToXml.to_string(), "json-to-xml");
        assert_eq!(
            serde_json::to_string(&Direction::XmlToJson).unwrap(),
            "\"xml-to-json\""
        );
        let role: MessageRole = serde_json::from_str("\"response\"").unwrap();
        assert_eq!(role, MessageRole::Response);
    }

    #[test]
    fn test_converter_for() {
        let converter = converter_for(Direction::XmlToJson, CodecOptions::default());
        assert_eq!(converter.direction(), Direction::XmlToJson);
        assert_eq!(converter.convert("<a>x</a>").unwrap(), r#"{"a":"x"}"#);
    }

    #[test]
    fn test_convert_payload_contract() {
        let encoder = JsonToXml::default();
        assert_eq!(encoder.convert_payload(r#"{"array": [1]}"#), REJECTED_KEY_PAYLOAD);
        assert_eq!(encoder.convert_payload("{not json"), "");
        assert_eq!(encoder.convert_payload(r#"{"a": 1}"#), "<a>1</a>");

        let decoder = XmlToJson::default();
        assert_eq!(decoder.convert_payload("<a><b></a>"), "");
        assert_eq!(decoder.convert_outcome("<a><b></a>"), Conversion::ConversionFailed);
        assert_eq!(decoder.convert_outcome("<a>1</a>"), Conversion::Success(r#"{"a":1}"#.into()));
    }
}
