//! Error types for in-place text transforms.

use std::fmt;

/// Errors that abort a text transform.
///
/// A failed transform never modifies the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The selection is not valid base64.
    InvalidBase64(String),

    /// A `%` is not followed by two hex digits.
    InvalidPercentEncoding {
        /// Byte offset of the offending `%` within the selection
        offset: usize,
    },

    /// Decoded bytes are not valid UTF-8.
    InvalidUtf8,

    /// Selection bounds are out of range or split a character.
    InvalidSelection {
        /// Selection start (byte offset)
        start: usize,
        /// Selection end (byte offset)
        end: usize,
    },

    /// The selection is empty or whitespace only.
    EmptySelection,

    /// The operation name is not recognized.
    UnknownOperation(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::InvalidBase64(msg) => write!(f, "Invalid base64: {}", msg),
            TransformError::InvalidPercentEncoding { offset } => write!(
                f,
                "Invalid percent-encoding at offset {}: '%' must be followed by two hex digits",
                offset
            ),
            TransformError::InvalidUtf8 => write!(f, "Decoded text is not valid UTF-8"),
            TransformError::InvalidSelection { start, end } => {
                write!(f, "Invalid selection {}..{}", start, end)
            }
            TransformError::EmptySelection => write!(f, "Nothing selected"),
            TransformError::UnknownOperation(op) => write!(f, "Unknown transform '{}'", op),
        }
    }
}

impl std::error::Error for TransformError {}
