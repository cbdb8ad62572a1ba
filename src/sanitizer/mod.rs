//! Outbound header sanitization.
//!
//! Removes headers a browser-hosted client is not allowed to set explicitly,
//! and headers whose names are not plain tokens. The filter never fails:
//! offending headers are dropped, not reported.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Header names (lowercase) that are never forwarded.
pub const FORBIDDEN_HEADERS: &[&str] = &[
    "accept-charset",
    "accept-encoding",
    "access-control-request-headers",
    "access-control-request-method",
    "connection",
    "content-length",
    "cookie",
    "cookie2",
    "date",
    "dnt",
    "expect",
    "host",
    "keep-alive",
    "origin",
    "referer",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "via",
];

/// Lowercase name prefixes that are never forwarded.
pub const FORBIDDEN_PREFIXES: &[&str] = &["sec-", "proxy-"];

static HEADER_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-_]+$").expect("Failed to compile header name regex"));

/// Checks whether a header with this name may be forwarded.
pub fn is_allowed(name: &str) -> bool {
    let lower = name.to_lowercase();
    let forbidden = FORBIDDEN_HEADERS.contains(&lower.as_str())
        || FORBIDDEN_PREFIXES.iter().any(|prefix| lower.starts_with(prefix));

    !forbidden && HEADER_NAME_REGEX.is_match(name)
}

/// Returns the subset of `headers` that may be forwarded.
///
/// # Examples
///
/// ```
/// use http_replay::sanitizer::filter;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("Cookie".to_string(), "session=1".to_string());
/// headers.insert("X-Api-Key".to_string(), "k".to_string());
///
/// let allowed = filter(&headers);
/// assert_eq!(allowed.len(), 1);
/// assert!(allowed.contains_key("X-Api-Key"));
/// ```
pub fn filter(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .filter(|(name, _)| {
            let allowed = is_allowed(name);
            if !allowed {
                debug!("Dropping header '{}'", name);
            }
            allowed
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}
