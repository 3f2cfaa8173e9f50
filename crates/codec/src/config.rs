//! Codec configuration.
//!
//! [`CodecOptions`] tunes the generic mapping convention without changing
//! its shape. The defaults reproduce the conventional behaviour; every field
//! can be omitted when the options are embedded in a host configuration file.
//!
//! # Example
//!
//! ```rust
//! use xrd_codec::CodecOptions;
//!
//! let options = CodecOptions {
//!     keep_strings: true,
//!     pretty_json: true,
//!     ..Default::default()
//! };
//! assert_eq!(options.max_depth, 128);
//! ```

use serde::{Deserialize, Serialize};

/// Default maximum element / JSON nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options shared by the encoder and the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecOptions {
    /// Keep decoded element text as JSON strings instead of coercing
    /// numbers, booleans and `null`.
    pub keep_strings: bool,

    /// Accept the reserved `array` key below the document root.
    ///
    /// The root is always checked. Nested occurrences are rejected by
    /// default because the decoder would collapse them into plain arrays.
    pub allow_nested_array_key: bool,

    /// Prefix encoded documents with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub xml_declaration: bool,

    /// Pretty-print decoded JSON.
    pub pretty_json: bool,

    /// Maximum nesting depth accepted in either direction.
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            keep_strings: false,
            allow_nested_array_key: false,
            xml_declaration: false,
            pretty_json: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CodecOptions::default();
        assert!(!options.keep_strings);
        assert!(!options.allow_nested_array_key);
        assert!(!options.xml_declaration);
        assert!(!options.pretty_json);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let options: CodecOptions =
            serde_json::from_str(r#"{"keepStrings": true, "maxDepth": 16}"#).unwrap();
        assert!(options.keep_strings);
        assert_eq!(options.max_depth, 16);
        assert!(!options.pretty_json);
    }
}
