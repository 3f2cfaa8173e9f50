//! # xrd-codec
//!
//! Structural JSON ↔ XML codec for bridging REST/JSON clients and
//! SOAP/XML services.
//!
//! The codec translates message payloads only. SOAP envelopes, X-Road
//! headers and transport belong to the callers, which hand payloads in and
//! take results out as plain strings.
//!
//! ## Features
//!
//! - **Encoder** ([`json_to_xml`]): JSON object or array → XML fragment.
//!   The reserved `array` key is rejected; JSON-LD keys such as `@id` are
//!   written as `__at__id`.
//! - **Decoder** ([`xml_to_json`]): XML fragment → JSON document. Synthetic
//!   `array` wrappers are flattened into JSON arrays and `__at__` keys are
//!   turned back into `@` keys.
//! - **One convention**: both directions share the mapping rules in
//!   [`xml`], the escape rule in [`escape`] and the options in
//!   [`CodecOptions`].
//!
//! ## Examples
//!
//! ```
//! use xrd_codec::{json_to_xml, xml_to_json};
//!
//! let xml = json_to_xml(r#"{"serviceCode":"testService","xRoadInstance":"FI"}"#)?;
//! assert_eq!(xml, "<serviceCode>testService</serviceCode><xRoadInstance>FI</xRoadInstance>");
//!
//! let json = xml_to_json(&xml)?;
//! assert_eq!(json, r#"{"serviceCode":"testService","xRoadInstance":"FI"}"#);
//! # Ok::<(), xrd_codec::CodecError>(())
//! ```
//!
//! Callers that need the plain-string contract go through a [`Converter`]:
//!
//! ```
//! use xrd_codec::{Converter, JsonToXml, REJECTED_KEY_PAYLOAD};
//!
//! let encoder = JsonToXml::default();
//! assert_eq!(encoder.convert_payload(r#"{"array":[1,2,3]}"#), REJECTED_KEY_PAYLOAD);
//! assert_eq!(encoder.convert_payload("{broken"), "");
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod escape;
pub mod json;
pub mod normalize;
pub mod validate;
pub mod xml;

// Re-export common types and functions
pub use config::CodecOptions;
pub use convert::{
    Conversion, Converter, Direction, JsonToXml, MessageRole, REJECTED_KEY_PAYLOAD, XmlToJson,
    converter_for, json_to_xml, json_to_xml_with, xml_to_json, xml_to_json_with,
};
pub use error::{CodecError, Result};
