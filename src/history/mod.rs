//! Per-entry edit and navigation history.
//!
//! Selecting a captured request starts a fresh [`EditHistory`] and
//! [`NavigationHistory`], both seeded with the request's encoded text.
//! Neither is persisted.
//!
//! # Example
//!
//! ```
//! use http_replay::history::{EditHistory, NavEntry, NavigationHistory};
//!
//! let mut edits = EditHistory::new("GET / HTTP/1.1\nHost: a");
//! edits.commit("GET /users HTTP/1.1\nHost: a");
//! assert_eq!(edits.undo(), Some("GET / HTTP/1.1\nHost: a"));
//!
//! let mut nav = NavigationHistory::new(NavEntry::new("GET / HTTP/1.1\nHost: a", true));
//! nav.push(NavEntry::new("GET /users HTTP/1.1\nHost: a", true));
//! assert!(nav.can_go_back());
//! ```

pub mod navigation;
pub mod undo;

pub use navigation::{NavEntry, NavigationHistory};
pub use undo::{EditHistory, DEFAULT_EDIT_DEBOUNCE, DEFAULT_UNDO_LIMIT};
