//! Request replay.
//!
//! This module issues a decoded request over the network with reqwest and
//! captures the full response. Each call is a single attempt: there is no
//! retry, no timeout and no cancellation.
//!
//! Replays run without ambient credentials. The client has no cookie store
//! and adds no authentication, so only headers present in the edited text
//! (after sanitization) reach the server.

pub mod error;

pub use error::{RequestError, NETWORK_ERROR_HINTS};

use crate::models::{ParsedRequest, ReplayResponse, Scheme};
use crate::sanitizer;
use log::{debug, info};
use std::time::Instant;
use url::Url;

/// Issues replayed requests.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    client: reqwest::Client,
}

impl ReplayEngine {
    /// Creates an engine with a fresh client.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::BuildError` if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;
        Ok(Self { client })
    }

    /// Creates an engine around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Replays `request` against `scheme://host/path`.
    ///
    /// Headers are sanitized before sending; the body is only attached for
    /// `POST`, `PUT` and `PATCH`. The elapsed time covers issuing the request
    /// up to the complete body.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use http_replay::codec::decode;
    /// use http_replay::executor::ReplayEngine;
    /// use http_replay::models::Scheme;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let request = decode("GET /get HTTP/1.1\nHost: httpbin.org")?;
    /// let engine = ReplayEngine::new()?;
    /// let response = engine.send(&request, Scheme::Https).await?;
    /// println!("{} {}", response.status_code, response.status_text);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send(
        &self,
        request: &ParsedRequest,
        scheme: Scheme,
    ) -> Result<ReplayResponse, RequestError> {
        let url = build_url(request, scheme)?;
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| RequestError::BuildError(format!("invalid method '{}'", request.method)))?;

        let headers = sanitizer::filter(&request.headers);
        debug!(
            "Forwarding {} of {} headers",
            headers.len(),
            request.headers.len()
        );

        let mut builder = self.client.request(method, url.clone());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.outbound_body() {
            builder = builder.body(body.to_string());
        }

        info!("Sending {} {}", request.method, url);
        let started = Instant::now();

        let response = builder.send().await?;

        let version = format!("{:?}", response.version());
        let status = response.status();
        // Registered reason phrase; non-standard codes get an empty one.
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let response_headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response.text().await?;
        let elapsed = started.elapsed();

        info!(
            "Received {} from {} in {}ms",
            status.as_u16(),
            url,
            elapsed.as_millis()
        );

        Ok(ReplayResponse {
            version,
            status_code: status.as_u16(),
            status_text,
            headers: response_headers,
            body,
            elapsed,
        })
    }
}

/// Assembles the target URL from the scheme, the `Host` value and the path.
///
/// A leading `/` is added when the request target lacks one.
pub fn build_url(request: &ParsedRequest, scheme: Scheme) -> Result<Url, RequestError> {
    let separator = if request.path.starts_with('/') { "" } else { "/" };
    let raw = format!("{}://{}{}{}", scheme, request.host, separator, request.path);
    Url::parse(&raw).map_err(|e| RequestError::InvalidUrl(format!("{} ({})", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let request = ParsedRequest::new("GET", "/users?page=2", "api.example.com:8080");
        let url = build_url(&request, Scheme::Https).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com:8080/users?page=2");

        let url = build_url(&request, Scheme::Http).unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_build_url_adds_missing_slash() {
        let request = ParsedRequest::new("GET", "status", "example.com");
        let url = build_url(&request, Scheme::Http).unwrap();
        assert_eq!(url.as_str(), "http://example.com/status");
    }

    #[test]
    fn test_build_url_rejects_bad_host() {
        let request = ParsedRequest::new("GET", "/", "exa mple.com");
        let result = build_url(&request, Scheme::Http);
        assert!(matches!(result, Err(RequestError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_invalid_method_is_build_error() {
        let engine = ReplayEngine::new().unwrap();
        let request = ParsedRequest::new("GE(T", "/", "127.0.0.1:9");
        let result = engine.send(&request, Scheme::Http).await;
        assert!(matches!(result, Err(RequestError::BuildError(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let engine = ReplayEngine::new().unwrap();
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let request = ParsedRequest::new("GET", "/", format!("127.0.0.1:{}", port));
        let result = engine.send(&request, Scheme::Http).await;
        assert!(matches!(result, Err(RequestError::NetworkError(_))));
    }
}
