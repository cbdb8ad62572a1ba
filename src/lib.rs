//! Raw HTTP request replay.
//!
//! This crate is the engine behind a "capture, edit, resend" request panel.
//! Captured requests are rendered as editable raw HTTP text, decoded back
//! into structured requests, stripped of headers a browser-hosted client may
//! not set, and replayed over the network. The raw response text comes back
//! with a status classification and the elapsed time.
//!
//! # Architecture
//!
//! - **models**: Captured entries, parsed requests and replay responses
//! - **codec**: Encodes captures to raw text and decodes edited text
//! - **sanitizer**: Drops forbidden and malformed outbound headers
//! - **executor**: Replays a parsed request with reqwest
//! - **formatter**: Renders responses and errors for the response area
//! - **transform**: Base64 and URL encode/decode of a selection
//! - **history**: Debounced undo/redo and back/forward navigation
//! - **filter**: Plain-text, regex and category filtering of the list
//! - **session**: Intent/effect state machine tying the pieces together
//! - **config**: Process-wide settings
//!
//! # Example
//!
//! ```no_run
//! use http_replay::codec::decode;
//! use http_replay::executor::ReplayEngine;
//! use http_replay::formatter::ResponseView;
//! use http_replay::models::Scheme;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = decode("GET /get HTTP/1.1\nHost: httpbin.org\nAccept: */*")?;
//! let engine = ReplayEngine::new()?;
//! let view = match engine.send(&request, Scheme::Https).await {
//!     Ok(response) => ResponseView::from_response(&response),
//!     Err(err) => ResponseView::from_error(&err),
//! };
//! println!("{} ({})\n{}", view.status_label, view.elapsed_label, view.raw_text);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod executor;
pub mod filter;
pub mod formatter;
pub mod history;
pub mod models;
pub mod sanitizer;
pub mod session;
pub mod transform;

pub use codec::{decode, decode_with, encode, DuplicateHeaderPolicy, ParseError};
pub use executor::{ReplayEngine, RequestError};
pub use formatter::ResponseView;
pub use session::{Effect, Intent, PanelSession};
