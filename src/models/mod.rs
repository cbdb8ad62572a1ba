//! Data models for captured requests, parsed requests and replay responses.
//!
//! This module contains the core data structures shared by the codec, the
//! replay engine, the filter engine and the panel session.

pub mod entry;
pub mod request;
pub mod response;

pub use entry::{CapturedEntry, Header};
pub use request::{ParsedRequest, Scheme, BODY_METHODS, DEFAULT_HTTP_VERSION};
pub use response::{ReplayResponse, StatusClass};
