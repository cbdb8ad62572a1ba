//! Parsed request data model.
//!
//! A `ParsedRequest` is what the raw-text codec produces from the editor
//! buffer. It has no lifecycle of its own: every send decodes it afresh.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Protocol version assumed when the request line omits one.
pub const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";

/// Methods whose body is forwarded on replay.
pub const BODY_METHODS: &[&str] = &["POST", "PUT", "PATCH"];

/// URL scheme used when replaying a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plain-text HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

impl Scheme {
    /// Returns the scheme as it appears in a URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Maps the "use HTTPS" toggle onto a scheme.
    pub fn from_use_https(use_https: bool) -> Self {
        if use_https {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request decoded from raw HTTP text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRequest {
    /// Request method, uppercased.
    pub method: String,

    /// Request target from the request line (path and query).
    pub path: String,

    /// Protocol version from the request line.
    pub version: String,

    /// Value of the `Host` header.
    pub host: String,

    /// Remaining headers. `Host` is never stored here.
    pub headers: HashMap<String, String>,

    /// Body text following the first blank line.
    pub body: Option<String>,
}

impl ParsedRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: impl Into<String>, path: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            version: DEFAULT_HTTP_VERSION.to_string(),
            host: host.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Looks up a header value, ignoring ASCII case in the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().map_or(false, |b| !b.is_empty())
    }

    /// Returns the body that should go on the wire, if any.
    ///
    /// Only `POST`, `PUT` and `PATCH` forward their body.
    pub fn outbound_body(&self) -> Option<&str> {
        if BODY_METHODS.contains(&self.method.to_uppercase().as_str()) {
            self.body.as_deref()
        } else {
            None
        }
    }
}
