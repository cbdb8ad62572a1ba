//! Replay response data models.
//!
//! This module defines the response produced by replaying a request and the
//! coarse status classification used for the status badge.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Coarse status classification for the status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusClass {
    /// 2xx responses.
    Success,
    /// 4xx responses.
    ClientError,
    /// 5xx (and above) responses.
    ServerError,
    /// 1xx and 3xx responses.
    Other,
    /// The send failed before a response arrived.
    Error,
}

impl StatusClass {
    /// Classifies an HTTP status code.
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            200..=299 => StatusClass::Success,
            400..=499 => StatusClass::ClientError,
            500..=u16::MAX => StatusClass::ServerError,
            _ => StatusClass::Other,
        }
    }

    /// Token handed to the rendering layer.
    pub fn as_token(&self) -> &'static str {
        match self {
            StatusClass::Success => "2xx",
            StatusClass::ClientError => "4xx",
            StatusClass::ServerError => "5xx",
            StatusClass::Other => "other",
            StatusClass::Error => "error",
        }
    }
}

/// A response received by replaying a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayResponse {
    /// Protocol version of the response, such as `HTTP/1.1`.
    pub version: String,

    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// Reason phrase for the status code. Empty when unknown.
    pub status_text: String,

    /// Response headers in the order the transport reported them.
    pub headers: Vec<(String, String)>,

    /// Full response body decoded as text.
    pub body: String,

    /// Wall-clock time from issuing the request until the full body arrived.
    pub elapsed: Duration,
}

impl ReplayResponse {
    /// Creates an HTTP/1.1 response with no headers and an empty body.
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            version: "HTTP/1.1".to_string(),
            status_code,
            status_text: status_text.into(),
            headers: Vec::new(),
            body: String::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Appends a response header.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Sets the response body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Looks up the first header with the given name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Classification used for the status badge.
    pub fn status_class(&self) -> StatusClass {
        StatusClass::from_status(self.status_code)
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        self.status_class() == StatusClass::Success
    }

    /// Renders the response as raw HTTP text, pretty-printing JSON bodies.
    pub fn to_raw_text(&self) -> String {
        crate::formatter::format_raw_response(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(StatusClass::from_status(200), StatusClass::Success);
        assert_eq!(StatusClass::from_status(204), StatusClass::Success);
        assert_eq!(StatusClass::from_status(404), StatusClass::ClientError);
        assert_eq!(StatusClass::from_status(503), StatusClass::ServerError);
        assert_eq!(StatusClass::from_status(301), StatusClass::Other);
        assert_eq!(StatusClass::from_status(101), StatusClass::Other);
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(StatusClass::Success.as_token(), "2xx");
        assert_eq!(StatusClass::ClientError.as_token(), "4xx");
        assert_eq!(StatusClass::ServerError.as_token(), "5xx");
        assert_eq!(StatusClass::Other.as_token(), "other");
        assert_eq!(StatusClass::Error.as_token(), "error");
    }

    #[test]
    fn test_response_headers() {
        let mut response = ReplayResponse::new(200, "OK");
        response.add_header("Content-Type", "application/json");
        response.add_header("Set-Cookie", "a=1");
        response.add_header("Set-Cookie", "b=2");

        assert_eq!(response.headers.len(), 3);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("set-cookie"), Some("a=1"));
        assert!(response.is_success());
    }

    #[test]
    fn test_to_raw_text() {
        let mut response = ReplayResponse::new(404, "Not Found");
        response.add_header("Content-Type", "application/json");
        response.set_body(r#"{"error":"missing"}"#);

        assert_eq!(
            response.to_raw_text(),
            "HTTP/1.1 404 Not Found\nContent-Type: application/json\n\n{\n  \"error\": \"missing\"\n}"
        );
    }
}
