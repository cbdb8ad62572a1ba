//! Error types for raw request decoding.
//!
//! This module defines the errors that abort a send because the edited text
//! cannot be turned back into a request.

use crate::formatter::Diagnostic;
use std::fmt;

/// Errors that can occur while decoding raw request text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The editor buffer is empty or whitespace only.
    EmptyRequest,

    /// The first line does not contain at least a method and a path.
    InvalidRequestLine {
        /// The offending request line
        line: String,
    },

    /// No `Host` header was found.
    MissingHost,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "No content to send"),
            ParseError::InvalidRequestLine { line } => write!(
                f,
                "Invalid request line '{}'. Expected format: METHOD PATH HTTP/1.1",
                line
            ),
            ParseError::MissingHost => write!(f, "Host header is missing!"),
        }
    }
}

impl std::error::Error for ParseError {}

impl Diagnostic for ParseError {
    fn kind(&self) -> &'static str {
        "ParseError"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::InvalidRequestLine {
            line: "GARBAGE".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid request line"));
        assert!(msg.contains("GARBAGE"));

        assert_eq!(format!("{}", ParseError::MissingHost), "Host header is missing!");
        assert_eq!(format!("{}", ParseError::EmptyRequest), "No content to send");
    }

    #[test]
    fn test_parse_error_has_no_hints() {
        assert_eq!(ParseError::MissingHost.kind(), "ParseError");
        assert!(ParseError::MissingHost.hints().is_empty());
    }
}
