//! Replay error types.
//!
//! This module defines the errors that can occur while issuing a replayed
//! request, and how they convert from the transport's own error types.

use crate::formatter::Diagnostic;
use std::fmt;

/// Hints shown under network failures.
pub const NETWORK_ERROR_HINTS: &[&str] = &[
    "Invalid Host header or URL",
    "Network connection issue",
    "CORS policy blocking the request",
    "Mixed Content (sending HTTP request from HTTPS context)",
    "Server is unreachable",
];

/// Errors that can occur during request replay.
#[derive(Debug)]
pub enum RequestError {
    /// The transport failed before a full response was received.
    ///
    /// This includes connection failures, DNS resolution errors, TLS
    /// failures and errors while reading the body.
    NetworkError(String),

    /// The target URL assembled from scheme, host and path is invalid.
    InvalidUrl(String),

    /// The request could not be built (invalid method token, header value).
    BuildError(String),
}

impl RequestError {
    /// Returns `true` for transport failures.
    pub fn is_network(&self) -> bool {
        matches!(self, RequestError::NetworkError(_))
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RequestError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            RequestError::BuildError(msg) => write!(f, "Request build error: {}", msg),
        }
    }
}

impl std::error::Error for RequestError {}

impl Diagnostic for RequestError {
    fn kind(&self) -> &'static str {
        match self {
            RequestError::NetworkError(_) => "NetworkError",
            RequestError::InvalidUrl(_) => "InvalidUrl",
            RequestError::BuildError(_) => "BuildError",
        }
    }

    fn hints(&self) -> &'static [&'static str] {
        match self {
            RequestError::NetworkError(_) => NETWORK_ERROR_HINTS,
            _ => &[],
        }
    }
}

/// Convert reqwest errors to RequestError.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

/// Convert URL parsing errors to RequestError.
impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let network_err = RequestError::NetworkError("Connection refused".to_string());
        assert_eq!(
            format!("{}", network_err),
            "Network error: Connection refused"
        );

        let invalid_url_err = RequestError::InvalidUrl("http://exa mple.com/".to_string());
        assert_eq!(
            format!("{}", invalid_url_err),
            "Invalid URL: http://exa mple.com/"
        );
    }

    #[test]
    fn test_only_network_errors_carry_hints() {
        let network_err = RequestError::NetworkError("refused".to_string());
        assert!(network_err.is_network());
        assert_eq!(network_err.hints().len(), NETWORK_ERROR_HINTS.len());
        assert_eq!(network_err.kind(), "NetworkError");

        let build_err = RequestError::BuildError("bad method".to_string());
        assert!(!build_err.is_network());
        assert!(build_err.hints().is_empty());
    }

    #[test]
    fn test_network_hints_name_browser_causes() {
        let hints = RequestError::NetworkError("refused".to_string()).hints();
        assert!(hints.iter().any(|h| h.starts_with("CORS")));
        assert!(hints.iter().any(|h| h.starts_with("Mixed Content")));
        assert_eq!(hints.first(), Some(&"Invalid Host header or URL"));
        assert_eq!(hints.last(), Some(&"Server is unreachable"));
    }

    #[test]
    fn test_from_url_parse_error() {
        let err: RequestError = url::Url::parse("http://[::1").unwrap_err().into();
        assert!(matches!(err, RequestError::InvalidUrl(_)));
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: &dyn std::error::Error = &RequestError::NetworkError("x".to_string());
        assert_eq!(format!("{}", err), "Network error: x");
    }
}
