//! Raw HTTP text codec.
//!
//! Converts a captured request into the editable raw text shown in the
//! request editor, and decodes edited text back into a `ParsedRequest`.
//!
//! The raw format is a request line, one `Name: Value` line per header, a
//! blank line, and the body:
//!
//! ```text
//! POST /api/items?draft=1 HTTP/1.1
//! Host: example.com
//! Content-Type: application/json
//!
//! {
//!   "name": "widget"
//! }
//! ```
//!
//! Decoding is deliberately lenient: malformed header lines and HTTP/2
//! pseudo-headers are dropped instead of failing the whole request.

pub mod error;

pub use error::ParseError;

use crate::formatter::pretty_or_raw;
use crate::models::{CapturedEntry, ParsedRequest, DEFAULT_HTTP_VERSION};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::{Position, Url};

/// How repeated header names collapse into the decoded header map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicateHeaderPolicy {
    /// The last occurrence of a name wins.
    #[default]
    LastWins,
    /// The first occurrence of a name wins; later ones are ignored.
    FirstWins,
}

impl DuplicateHeaderPolicy {
    /// Names compare ignoring ASCII case; the surviving entry keeps the
    /// spelling of the occurrence that won.
    fn insert(&self, headers: &mut HashMap<String, String>, name: &str, value: &str) {
        let existing = headers
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))
            .cloned();

        match (self, existing) {
            (DuplicateHeaderPolicy::FirstWins, Some(_)) => {}
            (DuplicateHeaderPolicy::LastWins, Some(previous)) => {
                headers.remove(&previous);
                headers.insert(name.to_string(), value.to_string());
            }
            (_, None) => {
                headers.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn set_host(&self, host: &mut Option<String>, value: &str) {
        if host.is_none() || *self == DuplicateHeaderPolicy::LastWins {
            *host = Some(value.to_string());
        }
    }
}

/// Classification of a single line in the header section.
#[derive(Debug, PartialEq, Eq)]
enum HeaderLine<'a> {
    Field(&'a str, &'a str),
    Pseudo,
    Malformed,
}

/// Encodes a captured entry as editable raw HTTP text.
///
/// A `Host` header is synthesized from the URL authority when the capture has
/// none. JSON bodies are re-indented with two spaces.
///
/// # Examples
///
/// ```
/// use http_replay::codec::encode;
/// use http_replay::models::CapturedEntry;
///
/// let entry = CapturedEntry::new("GET", "https://example.com/foo?x=1")
///     .with_header("Accept", "*/*");
/// assert_eq!(
///     encode(&entry),
///     "GET /foo?x=1 HTTP/1.1\nHost: example.com\nAccept: */*"
/// );
/// ```
pub fn encode(entry: &CapturedEntry) -> String {
    let (target, authority) = split_url(&entry.url);
    let version = entry
        .http_version
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_HTTP_VERSION);

    let mut lines = Vec::with_capacity(entry.headers.len() + 2);
    lines.push(format!("{} {} {}", entry.method, target, version));

    if !entry.has_header("host") {
        if let Some(authority) = authority {
            lines.push(format!("Host: {}", authority));
        }
    }

    for header in &entry.headers {
        lines.push(format!("{}: {}", header.name, header.value));
    }

    let mut raw = lines.join("\n");

    if let Some(body) = entry.body.as_deref().filter(|b| !b.is_empty()) {
        raw.push_str("\n\n");
        raw.push_str(&pretty_or_raw(body));
    }

    raw
}

/// Splits a URL into the request target (path and query) and the authority
/// used for a synthesized `Host` header.
fn split_url(url: &str) -> (String, Option<String>) {
    match Url::parse(url) {
        Ok(parsed) => {
            let target = parsed[Position::BeforePath..Position::AfterQuery].to_string();
            let authority = &parsed[Position::BeforeHost..Position::AfterPort];
            let authority = (!authority.is_empty()).then(|| authority.to_string());
            (target, authority)
        }
        Err(e) => {
            debug!("Captured URL '{}' did not parse: {}", url, e);
            (url.to_string(), None)
        }
    }
}

/// Decodes raw request text using the default duplicate-header policy.
///
/// # Examples
///
/// ```
/// use http_replay::codec::decode;
///
/// let request = decode("GET /foo HTTP/1.1\nHost: example.com\nAccept: */*\n\n").unwrap();
/// assert_eq!(request.method, "GET");
/// assert_eq!(request.path, "/foo");
/// assert_eq!(request.host, "example.com");
/// assert_eq!(request.headers.get("Accept").map(String::as_str), Some("*/*"));
/// assert_eq!(request.body, None);
/// ```
pub fn decode(text: &str) -> Result<ParsedRequest, ParseError> {
    decode_with(text, DuplicateHeaderPolicy::default())
}

/// Decodes raw request text, collapsing repeated header names per `policy`.
///
/// # Errors
///
/// - `ParseError::EmptyRequest` when the text is blank
/// - `ParseError::InvalidRequestLine` when the first line lacks a method or path
/// - `ParseError::MissingHost` when no `Host` header is present
pub fn decode_with(text: &str, policy: DuplicateHeaderPolicy) -> Result<ParsedRequest, ParseError> {
    // Normalize line endings (handle both \r\n and \n)
    let normalized = text.replace("\r\n", "\n");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyRequest);
    }

    let mut lines = trimmed.split('\n');
    let request_line = lines.next().ok_or(ParseError::EmptyRequest)?;
    let (method, path, version) = parse_request_line(request_line)?;

    let mut headers = HashMap::new();
    let mut host = None;
    let mut body = None;

    while let Some(line) = lines.next() {
        if line.trim().is_empty() {
            let rest: Vec<&str> = lines.by_ref().collect();
            if !rest.is_empty() {
                body = Some(rest.join("\n"));
            }
            break;
        }

        match parse_header_line(line) {
            HeaderLine::Field(name, value) if name.eq_ignore_ascii_case("host") => {
                policy.set_host(&mut host, value);
            }
            HeaderLine::Field(name, value) => policy.insert(&mut headers, name, value),
            HeaderLine::Pseudo => debug!("Skipping pseudo-header line '{}'", line.trim()),
            HeaderLine::Malformed => debug!("Dropping malformed header line '{}'", line),
        }
    }

    let host = host.ok_or(ParseError::MissingHost)?;

    Ok(ParsedRequest {
        method,
        path,
        version,
        host,
        headers,
        body,
    })
}

/// Parses `METHOD PATH [VERSION]`.
fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(method), Some(path)) => {
            let version = parts.next().unwrap_or(DEFAULT_HTTP_VERSION);
            Ok((method.to_uppercase(), path.to_string(), version.to_string()))
        }
        _ => Err(ParseError::InvalidRequestLine {
            line: line.trim().to_string(),
        }),
    }
}

fn parse_header_line(line: &str) -> HeaderLine<'_> {
    if line.trim_start().starts_with(':') {
        return HeaderLine::Pseudo;
    }

    match line.find(':') {
        Some(colon) if colon > 0 => {
            let name = line[..colon].trim();
            let value = line[colon + 1..].trim();
            if name.is_empty() || value.is_empty() {
                HeaderLine::Malformed
            } else {
                HeaderLine::Field(name, value)
            }
        }
        _ => HeaderLine::Malformed,
    }
}
