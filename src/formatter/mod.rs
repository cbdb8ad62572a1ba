//! Response formatting.
//!
//! This module renders replay results into the raw text shown in the response
//! area, together with the status badge and elapsed-time labels. Failures are
//! rendered as diagnostic text so the operator never sees a silent error.

pub mod json;

pub use json::{format_json_pretty, is_valid_json, pretty_or_raw};

use crate::models::response::{ReplayResponse, StatusClass};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Errors that can occur during body formatting.
#[derive(Debug)]
pub enum FormatError {
    /// JSON parsing or formatting error.
    JsonError(String),

    /// UTF-8 encoding error.
    EncodingError(String),

    /// Body too large to format.
    ResponseTooLarge(usize),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::JsonError(msg) => write!(f, "JSON formatting error: {}", msg),
            FormatError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            FormatError::ResponseTooLarge(size) => {
                write!(f, "Response too large to format: {} bytes", size)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// An error that can be rendered into the response area.
///
/// Implemented by the errors that abort a send.
pub trait Diagnostic: fmt::Display {
    /// Short error category shown on the `Type:` line.
    fn kind(&self) -> &'static str;

    /// Likely causes listed under the message. Empty by default.
    fn hints(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Everything the rendering layer needs to show a send result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseView {
    /// Raw response text, or diagnostic text for failures.
    pub raw_text: String,

    /// Badge classification.
    pub status: StatusClass,

    /// Badge text, e.g. `200 OK` or `Error`.
    pub status_label: String,

    /// Elapsed time label, e.g. `142ms`.
    pub elapsed_label: String,
}

impl ResponseView {
    /// Builds the view for a received response.
    pub fn from_response(response: &ReplayResponse) -> Self {
        Self {
            raw_text: format_raw_response(response),
            status: response.status_class(),
            status_label: format_status_label(response),
            elapsed_label: format_elapsed(response.elapsed),
        }
    }

    /// Builds the view for a failed send.
    pub fn from_error<E: Diagnostic + ?Sized>(err: &E) -> Self {
        Self {
            raw_text: format_error_diagnostic(&err.to_string(), err.kind(), err.hints()),
            status: StatusClass::Error,
            status_label: "Error".to_string(),
            elapsed_label: format_elapsed(Duration::ZERO),
        }
    }
}

/// Formats the status line, e.g. `HTTP/1.1 404 Not Found`.
pub fn format_status_line(response: &ReplayResponse) -> String {
    format!(
        "{} {} {}",
        response.version, response.status_code, response.status_text
    )
    .trim_end()
    .to_string()
}

/// Formats the badge text, e.g. `404 Not Found`.
pub fn format_status_label(response: &ReplayResponse) -> String {
    format!("{} {}", response.status_code, response.status_text)
        .trim_end()
        .to_string()
}

/// Formats an elapsed duration in whole milliseconds.
pub fn format_elapsed(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

/// Renders a response as raw HTTP text.
///
/// The status line is followed by every header as `Name: Value`, a blank
/// line, and the body (pretty-printed when it is JSON).
pub fn format_raw_response(response: &ReplayResponse) -> String {
    let mut raw = format_status_line(response);
    raw.push('\n');

    for (name, value) in &response.headers {
        raw.push_str(name);
        raw.push_str(": ");
        raw.push_str(value);
        raw.push('\n');
    }

    raw.push('\n');
    raw.push_str(&pretty_or_raw(&response.body));
    raw
}

/// Renders an error message with optional hints as diagnostic text.
pub fn format_error_diagnostic(message: &str, kind: &str, hints: &[&str]) -> String {
    let mut text = format!("Error: {}\n\n", message);

    if !hints.is_empty() {
        text.push_str("Possible causes:\n");
        for hint in hints {
            text.push_str("- ");
            text.push_str(hint);
            text.push('\n');
        }
        text.push('\n');
    }

    text.push_str(&format!("Type: {}\n", kind));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> ReplayResponse {
        let mut response = ReplayResponse::new(201, "Created");
        response.add_header("content-type", "application/json");
        response.add_header("x-request-id", "abc");
        response.set_body(r#"{"id":7}"#);
        response.elapsed = Duration::from_millis(142);
        response
    }

    #[test]
    fn test_format_raw_response() {
        let raw = format_raw_response(&sample_response());
        assert_eq!(
            raw,
            "HTTP/1.1 201 Created\ncontent-type: application/json\nx-request-id: abc\n\n{\n  \"id\": 7\n}"
        );
    }

    #[test]
    fn test_format_raw_response_non_json_body() {
        let mut response = ReplayResponse::new(200, "OK");
        response.set_body("<html></html>");
        assert_eq!(format_raw_response(&response), "HTTP/1.1 200 OK\n\n<html></html>");
    }

    #[test]
    fn test_status_line_without_reason() {
        let response = ReplayResponse::new(599, "");
        assert_eq!(format_status_line(&response), "HTTP/1.1 599");
        assert_eq!(format_status_label(&response), "599");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(0)), "0ms");
        assert_eq!(format_elapsed(Duration::from_micros(1_500_900)), "1500ms");
    }

    #[test]
    fn test_response_view_from_response() {
        let view = ResponseView::from_response(&sample_response());
        assert_eq!(view.status, StatusClass::Success);
        assert_eq!(view.status_label, "201 Created");
        assert_eq!(view.elapsed_label, "142ms");
        assert!(view.raw_text.starts_with("HTTP/1.1 201 Created\n"));
    }

    struct Boom;

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "boom")
        }
    }

    impl Diagnostic for Boom {
        fn kind(&self) -> &'static str {
            "Boom"
        }

        fn hints(&self) -> &'static [&'static str] {
            &["first", "second"]
        }
    }

    #[test]
    fn test_response_view_from_error() {
        let view = ResponseView::from_error(&Boom);
        assert_eq!(view.status, StatusClass::Error);
        assert_eq!(view.status_label, "Error");
        assert_eq!(view.elapsed_label, "0ms");
        assert_eq!(
            view.raw_text,
            "Error: boom\n\nPossible causes:\n- first\n- second\n\nType: Boom\n"
        );
    }

    #[test]
    fn test_error_diagnostic_without_hints() {
        let text = format_error_diagnostic("bad", "ParseError", &[]);
        assert_eq!(text, "Error: bad\n\nType: ParseError\n");
    }
}
