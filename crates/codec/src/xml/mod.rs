//! The generic XML ↔ JSON mapping convention.
//!
//! Both directions of the codec go through this module, so the rules below
//! are defined once and tested once.
//!
//! ## JSON → XML
//!
//! | JSON | XML |
//! |------|-----|
//! | `{"a": "x", "b": 1}` at the root | `<a>x</a><b>1</b>` |
//! | `{"a": {"b": true}}` | `<a><b>true</b></a>` |
//! | `{"a": ["x", "y"]}` | `<a>x</a><a>y</a>` |
//! | `{"a": [["x", "y"]]}` | `<a><array>x</array><array>y</array></a>` |
//! | `[{"id": 1}, {"id": 2}]` at the root | `<array><id>1</id></array><array><id>2</id></array>` |
//! | `[[1, 2], [3]]` at the root | `<array><array>1</array><array>2</array></array><array><array>3</array></array>` |
//! | `{"a": ""}` | `<a/>` |
//! | `{"a": null}` | `<a>null</a>` |
//! | `{"a": {"lang": "fi", "content": "x"}}` | `<a><lang>fi</lang>x</a>` |
//! | `{"@id": "x"}` | `<__at__id>x</__at__id>` |
//!
//! ## XML → JSON
//!
//! The input is treated as a fragment: every top-level element becomes a
//! member of one root object. Repeated sibling tags accumulate into an
//! array, attributes fold into members, bare text is coerced to numbers,
//! booleans and `null` (see [`utils::string_to_value`]), and text next to
//! children or attributes lands under `content`.
//!
//! Whether `<a>x</a>` was a single value or a one-element array cannot be
//! told from the XML alone. The raw object therefore keeps the synthetic
//! `array` members produced by the encoder for arrays of arrays and for
//! root arrays; [`crate::normalize`] turns them back into JSON arrays.
//!
//! ## Limitations
//!
//! - One-element arrays decode as the element itself; empty arrays vanish.
//! - Empty objects and empty strings both become empty elements and decode
//!   as `""`.
//! - Attribute information is not preserved as such.
//! - A root object cannot have a `content` member.

pub mod de;
pub mod ser;
pub mod utils;

pub use utils::{ARRAY_KEY, CONTENT_KEY};

// Re-export serialization functions
pub use ser::{XmlSerializer, to_xml_string, to_xml_vec, to_xml_writer};

// Re-export deserialization functions
pub use de::{from_xml_slice, from_xml_str};
