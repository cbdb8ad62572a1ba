//! Configuration schema for the replay engine.
//!
//! This module defines the user-tunable settings and their validation.

use crate::codec::DuplicateHeaderPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound accepted for `editDebounceMs`.
pub const MAX_EDIT_DEBOUNCE_MS: u64 = 10_000;

/// Settings for the replay engine, read from the "http-replay" key.
///
/// Missing settings fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayConfig {
    /// Maximum number of undo snapshots per selected request.
    ///
    /// Oldest snapshots are evicted first. Defaults to 50. Must be > 0.
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Idle time in milliseconds before typing becomes an undo snapshot.
    ///
    /// Defaults to 500. Must not exceed 10000.
    #[serde(default = "default_edit_debounce_ms")]
    pub edit_debounce_ms: u64,

    /// How repeated header names are collapsed when decoding.
    ///
    /// `lastWins` (default) or `firstWins`.
    #[serde(default)]
    pub duplicate_header_policy: DuplicateHeaderPolicy,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            undo_limit: default_undo_limit(),
            edit_debounce_ms: default_edit_debounce_ms(),
            duplicate_header_policy: DuplicateHeaderPolicy::default(),
        }
    }
}

impl ReplayConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive message.
    pub fn validate(&self) -> Result<(), String> {
        if self.undo_limit == 0 {
            return Err("undoLimit must be greater than 0".to_string());
        }

        if self.edit_debounce_ms > MAX_EDIT_DEBOUNCE_MS {
            return Err(format!(
                "editDebounceMs must not exceed {}",
                MAX_EDIT_DEBOUNCE_MS
            ));
        }

        Ok(())
    }

    /// The debounce window as a `Duration`.
    pub fn edit_debounce(&self) -> Duration {
        Duration::from_millis(self.edit_debounce_ms)
    }

    /// Merges this configuration with another, using values from `other`.
    pub fn merge(&self, other: &ReplayConfig) -> Self {
        Self {
            undo_limit: other.undo_limit,
            edit_debounce_ms: other.edit_debounce_ms,
            duplicate_header_policy: other.duplicate_header_policy,
        }
    }
}

fn default_undo_limit() -> usize {
    50
}

fn default_edit_debounce_ms() -> u64 {
    500
}
