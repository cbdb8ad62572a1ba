//! Back/forward history of sent requests.

use serde::{Deserialize, Serialize};

/// One sent state: the editor text and the scheme toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    pub raw_text: String,
    pub use_https: bool,
}

impl NavEntry {
    pub fn new(raw_text: impl Into<String>, use_https: bool) -> Self {
        Self {
            raw_text: raw_text.into(),
            use_https,
        }
    }
}

/// Linear, browser-style history.
///
/// Pushing from the middle of the history discards everything after the
/// cursor. Consecutive identical entries are stored once.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<NavEntry>,
    cursor: usize,
}

impl NavigationHistory {
    /// Creates a history holding only `seed`.
    pub fn new(seed: NavEntry) -> Self {
        Self {
            entries: vec![seed],
            cursor: 0,
        }
    }

    /// Appends `entry` after the cursor.
    ///
    /// Returns `false` if `entry` equals the entry under the cursor.
    pub fn push(&mut self, entry: NavEntry) -> bool {
        if self.current() == Some(&entry) {
            return false;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Moves one step back and returns the entry there.
    pub fn back(&mut self) -> Option<&NavEntry> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Moves one step forward and returns the entry there.
    pub fn forward(&mut self) -> Option<&NavEntry> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&NavEntry> {
        self.entries.get(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> NavEntry {
        NavEntry::new(text, true)
    }

    #[test]
    fn test_seeded_history() {
        let mut nav = NavigationHistory::new(entry("a"));
        assert_eq!(nav.len(), 1);
        assert!(!nav.can_go_back());
        assert!(!nav.can_go_forward());
        assert_eq!(nav.back(), None);
        assert_eq!(nav.forward(), None);
        assert_eq!(nav.current(), Some(&entry("a")));
    }

    #[test]
    fn test_push_back_forward() {
        let mut nav = NavigationHistory::new(entry("a"));
        assert!(nav.push(entry("b")));
        assert!(nav.push(entry("c")));

        assert_eq!(nav.back(), Some(&entry("b")));
        assert_eq!(nav.back(), Some(&entry("a")));
        assert_eq!(nav.back(), None);
        assert_eq!(nav.forward(), Some(&entry("b")));
        assert_eq!(nav.forward(), Some(&entry("c")));
        assert_eq!(nav.forward(), None);
    }

    #[test]
    fn test_consecutive_duplicate_ignored() {
        let mut nav = NavigationHistory::new(entry("a"));
        assert!(!nav.push(entry("a")));
        assert_eq!(nav.len(), 1);

        // Same text, different scheme is a distinct state
        assert!(nav.push(NavEntry::new("a", false)));
        assert_eq!(nav.len(), 2);
    }

    #[test]
    fn test_push_from_middle_truncates() {
        let mut nav = NavigationHistory::new(entry("a"));
        nav.push(entry("b"));
        nav.push(entry("c"));
        nav.back();
        nav.back();

        assert!(nav.push(entry("x")));
        assert_eq!(nav.len(), 2);
        assert!(!nav.can_go_forward());
        assert_eq!(nav.back(), Some(&entry("a")));
        assert_eq!(nav.forward(), Some(&entry("x")));
    }

    #[test]
    fn test_default_is_empty() {
        let mut nav = NavigationHistory::default();
        assert!(nav.is_empty());
        assert_eq!(nav.current(), None);
        assert!(nav.push(entry("a")));
        assert_eq!(nav.current(), Some(&entry("a")));
        assert!(!nav.can_go_back());
    }
}
