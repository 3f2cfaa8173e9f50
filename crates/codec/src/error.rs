//! Error types for JSON <-> XML conversion.
use thiserror::Error;

/// Errors produced by the codec.
///
/// [`CodecError::ReservedKey`] is the only validation failure callers are
/// expected to tell apart from the rest; see [`CodecError::is_rejected_key`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// The JSON input uses the key reserved for repeated elements.
    #[error("Invalid key \"array\" at {path}")]
    ReservedKey {
        /// JSON path of the offending key, e.g. `$.items[0].array`.
        path: String,
    },

    /// The JSON input has a key that already looks like an escaped `@` key.
    #[error("key \"{key}\" collides with the escaped form of '@'")]
    EscapeCollision {
        /// The offending key.
        key: String,
    },

    /// A JSON key cannot be used as an XML element name.
    #[error("\"{0}\" is not a valid XML element name")]
    InvalidElementName(String),

    /// The JSON document is neither an object nor an array.
    #[error("unsupported JSON root: expected an object or an array, found {0}")]
    UnsupportedRoot(&'static str),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// The document parsed but does not fit the mapping convention.
    #[error("{0}")]
    Structure(String),
}

impl CodecError {
    /// Returns true for the reserved-key validation failure.
    pub fn is_rejected_key(&self) -> bool {
        matches!(self, CodecError::ReservedKey { .. })
    }
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
