//! Search and category filtering over the capture list.
//!
//! Search matches against four haystacks of each entry: the URL, the
//! uppercased method, the headers flattened as `"Name: Value "` and the body.
//! Plain search is a case-insensitive substring match. Regex search compiles
//! the raw term once per pass; an invalid pattern hides every entry and is
//! reported through [`FilterOutcome::regex_error`] instead of failing.

use crate::models::CapturedEntry;
use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category filter for the request list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    All,
    Starred,
    /// Entries whose uppercased method equals this value exactly.
    Method(String),
}

impl Category {
    /// Parses a category name. Anything other than `all` or `starred` is a
    /// method filter, kept verbatim.
    pub fn parse(value: &str) -> Self {
        match value {
            "all" => Category::All,
            "starred" => Category::Starred,
            other => Category::Method(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::All => "all",
            Category::Starred => "starred",
            Category::Method(method) => method,
        }
    }

    fn admits(&self, entry: &CapturedEntry) -> bool {
        match self {
            Category::All => true,
            Category::Starred => entry.starred,
            Category::Method(method) => entry.method_upper() == *method,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session-wide filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub use_regex: bool,
    #[serde(default)]
    pub category: Category,
}

/// A search term that failed to compile as a regular expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    InvalidPattern { pattern: String, message: String },
}

impl fmt::Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegexError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for RegexError {}

#[derive(Debug)]
enum Matcher {
    Everything,
    Nothing,
    Plain { lower: String, upper: String },
    Pattern(Regex),
}

/// A [`FilterState`] prepared for evaluating many entries.
#[derive(Debug)]
pub struct CompiledFilter {
    matcher: Matcher,
    category: Category,
    regex_error: Option<RegexError>,
}

impl CompiledFilter {
    pub fn new(state: &FilterState) -> Self {
        let mut regex_error = None;
        let matcher = if state.search_term.is_empty() {
            Matcher::Everything
        } else if state.use_regex {
            match Regex::new(&state.search_term) {
                Ok(regex) => Matcher::Pattern(regex),
                Err(e) => {
                    warn!("Invalid regex pattern '{}': {}", state.search_term, e);
                    regex_error = Some(RegexError::InvalidPattern {
                        pattern: state.search_term.clone(),
                        message: e.to_string(),
                    });
                    Matcher::Nothing
                }
            }
        } else {
            Matcher::Plain {
                lower: state.search_term.to_lowercase(),
                upper: state.search_term.to_uppercase(),
            }
        };

        Self {
            matcher,
            category: state.category.clone(),
            regex_error,
        }
    }

    pub fn regex_error(&self) -> Option<&RegexError> {
        self.regex_error.as_ref()
    }

    /// Whether `entry` passes both the search and the category filter.
    pub fn matches(&self, entry: &CapturedEntry) -> bool {
        self.category.admits(entry) && self.matches_search(entry)
    }

    fn matches_search(&self, entry: &CapturedEntry) -> bool {
        let method = entry.method_upper();
        let headers = header_haystack(entry);
        let body = entry.body.as_deref().unwrap_or_default();

        match &self.matcher {
            Matcher::Everything => true,
            Matcher::Nothing => false,
            Matcher::Pattern(regex) => {
                regex.is_match(&entry.url)
                    || regex.is_match(&method)
                    || regex.is_match(&headers)
                    || regex.is_match(body)
            }
            Matcher::Plain { lower, upper } => {
                entry.url.to_lowercase().contains(lower.as_str())
                    || method.contains(upper.as_str())
                    || headers.to_lowercase().contains(lower.as_str())
                    || body.to_lowercase().contains(lower.as_str())
            }
        }
    }
}

fn header_haystack(entry: &CapturedEntry) -> String {
    entry
        .headers
        .iter()
        .map(|h| format!("{}: {} ", h.name, h.value))
        .collect()
}

/// Visibility of every entry after one filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOutcome {
    /// One flag per entry, in list order.
    pub visible: Vec<bool>,
    pub visible_count: usize,
    /// Set when regex mode is on and the term does not compile.
    pub regex_error: Option<String>,
}

impl FilterOutcome {
    /// Placeholder text for a list with no visible rows.
    ///
    /// Returns `None` when something is visible or the list itself is empty.
    pub fn empty_state_message(&self) -> Option<&'static str> {
        if self.visible.is_empty() || self.visible_count > 0 {
            None
        } else if self.regex_error.is_some() {
            Some("Invalid regex pattern")
        } else {
            Some("No requests match your filter")
        }
    }
}

/// Checks a single entry against `state`.
pub fn evaluate(entry: &CapturedEntry, state: &FilterState) -> bool {
    CompiledFilter::new(state).matches(entry)
}

/// Runs one filter pass over `entries`.
///
/// # Examples
///
/// ```
/// use http_replay::filter::{apply, FilterState};
/// use http_replay::models::CapturedEntry;
///
/// let entries = vec![
///     CapturedEntry::new("GET", "https://api.example.com/users"),
///     CapturedEntry::new("POST", "https://api.example.com/login"),
/// ];
/// let state = FilterState {
///     search_term: "USERS".to_string(),
///     ..FilterState::default()
/// };
///
/// let outcome = apply(&entries, &state);
/// assert_eq!(outcome.visible, vec![true, false]);
/// ```
pub fn apply(entries: &[CapturedEntry], state: &FilterState) -> FilterOutcome {
    let compiled = CompiledFilter::new(state);
    let visible: Vec<bool> = entries.iter().map(|e| compiled.matches(e)).collect();
    let visible_count = visible.iter().filter(|v| **v).count();

    FilterOutcome {
        visible,
        visible_count,
        regex_error: compiled.regex_error().map(|e| e.to_string()),
    }
}
