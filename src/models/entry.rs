//! Captured request data model.
//!
//! A `CapturedEntry` is what the capture collaborator hands to the session for
//! every finished network request. Entries are append-only: the only mutation
//! a session performs is toggling the `starred` flag.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use url::{Position, Url};

/// A single header as it appeared on the wire.
///
/// Captures keep headers as an ordered list so duplicates survive in
/// capture order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name, exactly as captured.
    pub name: String,
    /// Header value, exactly as captured.
    pub value: String,
}

impl Header {
    /// Creates a header from a name/value pair.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A request observed by the capture collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedEntry {
    /// Absolute request URL, including scheme and query string.
    pub url: String,

    /// Request method as captured (not normalized).
    pub method: String,

    /// Protocol version reported by the capture, such as `HTTP/1.1`.
    #[serde(default)]
    pub http_version: Option<String>,

    /// Request headers in capture order.
    #[serde(default)]
    pub headers: Vec<Header>,

    /// Request body text, if the request carried one.
    #[serde(default)]
    pub body: Option<String>,

    /// Whether the operator starred this entry.
    #[serde(default)]
    pub starred: bool,

    /// When the entry was captured.
    #[serde(default = "Utc::now")]
    pub captured_at: DateTime<Utc>,
}

impl CapturedEntry {
    /// Creates an entry with no headers and no body, captured now.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            http_version: None,
            headers: Vec::new(),
            body: None,
            starred: false,
            captured_at: Utc::now(),
        }
    }

    /// Appends a header, keeping capture order.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the protocol version.
    pub fn with_http_version(mut self, version: impl Into<String>) -> Self {
        self.http_version = Some(version.into());
        self
    }

    /// Returns the method uppercased, as used by search and category filters.
    pub fn method_upper(&self) -> String {
        self.method.to_uppercase()
    }

    /// Checks for a header by name, ignoring ASCII case.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h.name.eq_ignore_ascii_case(name))
    }

    /// Flips the starred flag and returns the new value.
    pub fn toggle_star(&mut self) -> bool {
        self.starred = !self.starred;
        self.starred
    }

    /// Returns `true` when the URL uses the `https` scheme.
    pub fn is_https(&self) -> bool {
        Url::parse(&self.url)
            .map(|u| u.scheme() == "https")
            .unwrap_or(false)
    }

    /// Path and query for the list row, falling back to the full URL when it
    /// cannot be parsed.
    pub fn display_path(&self) -> String {
        match Url::parse(&self.url) {
            Ok(url) => url[Position::BeforePath..Position::AfterQuery].to_string(),
            Err(_) => self.url.clone(),
        }
    }

    /// Capture time as `HH:MM:SS` on the local clock.
    pub fn time_label(&self) -> String {
        self.captured_at
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}
