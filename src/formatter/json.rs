//! JSON pretty-printing shared by request encoding and response rendering.
//!
//! Bodies that parse as JSON are re-serialized with 2-space indentation and
//! their original key order; anything else is passed through untouched.

use crate::formatter::FormatError;
use serde_json::Value;

/// Maximum JSON size to format (10MB).
///
/// Larger bodies are shown verbatim rather than re-serialized.
const MAX_JSON_FORMAT_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Formats JSON with pretty-printing using 2-space indentation.
///
/// # Arguments
///
/// * `json` - JSON string to format
///
/// # Returns
///
/// `Ok(String)` with the formatted JSON, or `Err(FormatError)` if the text is
/// not valid JSON or exceeds the size limit.
///
/// # Examples
///
/// ```
/// use http_replay::formatter::json::format_json_pretty;
///
/// let formatted = format_json_pretty(r#"{"name":"John","age":30}"#).unwrap();
/// assert_eq!(formatted, "{\n  \"name\": \"John\",\n  \"age\": 30\n}");
/// ```
pub fn format_json_pretty(json: &str) -> Result<String, FormatError> {
    if json.len() > MAX_JSON_FORMAT_SIZE {
        return Err(FormatError::ResponseTooLarge(json.len()));
    }

    let value: Value =
        serde_json::from_str(json).map_err(|e| FormatError::JsonError(e.to_string()))?;

    // Formatted output is usually about 1.5x the compact input
    let mut buf = Vec::with_capacity(json.len() + (json.len() / 2));
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    use serde::Serialize;
    value
        .serialize(&mut serializer)
        .map_err(|e| FormatError::JsonError(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| FormatError::EncodingError(e.to_string()))
}

/// Pretty-prints `text` when it is valid JSON, otherwise returns it unchanged.
pub fn pretty_or_raw(text: &str) -> String {
    format_json_pretty(text).unwrap_or_else(|_| text.to_string())
}

/// Checks whether `text` parses as JSON.
pub fn is_valid_json(text: &str) -> bool {
    serde_json::from_str::<Value>(text).is_ok()
}
