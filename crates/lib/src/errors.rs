//! Error types for container operations.
//!
//! Most container operations degrade to sentinel values (`None`, an empty
//! container) when the data they look for is absent. The variants here cover the
//! cases where there is no sensible fallback: an input that cannot be coerced into
//! a container, strict JSON parsing, JSON encoding, and unknown virtual properties.

use thiserror::Error;

/// Structured error types for container operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MapError {
    /// The input has no coercion path into the requested shape
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A JSON string could not be parsed into an array or object
    #[error("JSON parse failed: {reason}")]
    Parse { reason: String },

    /// A value graph could not be encoded as JSON
    #[error("JSON encoding failed: {reason}")]
    Encoding { reason: String },

    /// Access to a virtual property other than `length` or `size`
    #[error("Property [{name}] does not exist on this collection instance.")]
    UndefinedProperty { name: String },
}

impl MapError {
    /// Check if this error is a coercion failure
    pub fn is_type_error(&self) -> bool {
        matches!(self, MapError::TypeMismatch { .. })
    }

    /// Check if this error came from JSON parsing
    pub fn is_parse_error(&self) -> bool {
        matches!(self, MapError::Parse { .. })
    }

    /// Check if this error came from JSON encoding
    pub fn is_encoding_error(&self) -> bool {
        matches!(self, MapError::Encoding { .. })
    }

    /// Check if this error is an unknown property access
    pub fn is_undefined_property(&self) -> bool {
        matches!(self, MapError::UndefinedProperty { .. })
    }

    /// Get the property name if this is a property error
    pub fn property(&self) -> Option<&str> {
        match self {
            MapError::UndefinedProperty { name } => Some(name),
            _ => None,
        }
    }
}

// Conversion from MapError to the main Error type
impl From<MapError> for crate::Error {
    fn from(err: MapError) -> Self {
        crate::Error::Map(err)
    }
}
