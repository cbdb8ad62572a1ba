//! Configuration management for the replay engine.
//!
//! Configuration is read from a settings JSON value under the "http-replay"
//! key, merged with defaults, validated, and kept in a process-wide singleton.

pub mod schema;

pub use schema::{ReplayConfig, MAX_EDIT_DEBOUNCE_MS};

use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Settings key holding the replay configuration.
pub const SETTINGS_KEY: &str = "http-replay";

/// Global configuration instance.
static CONFIG: Lazy<RwLock<ReplayConfig>> = Lazy::new(|| RwLock::new(ReplayConfig::default()));

/// Loads configuration from a settings JSON value.
///
/// Unparsable settings are logged and replaced by defaults. A configuration
/// that parses but fails validation is rejected and the global configuration
/// is left unchanged.
///
/// # Example
///
/// ```no_run
/// use http_replay::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "http-replay": {
///         "undoLimit": 100,
///         "duplicateHeaderPolicy": "firstWins"
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.undo_limit, 100);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ReplayConfig, String> {
    let mut config = ReplayConfig::default();

    if let Some(settings) = settings_json {
        if let Some(replay_settings) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<ReplayConfig>(replay_settings.clone()) {
                Ok(user_config) => {
                    config = config.merge(&user_config);
                }
                Err(e) => {
                    warn!(
                        "Failed to parse {} settings: {}. Using defaults.",
                        SETTINGS_KEY, e
                    );
                }
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Returns a copy of the current global configuration.
pub fn get_config() -> ReplayConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| ReplayConfig::default())
}

/// Updates the global configuration in place.
///
/// If the result fails validation, the configuration reverts to defaults.
///
/// # Example
///
/// ```no_run
/// use http_replay::config::update_config;
///
/// update_config(|config| {
///     config.edit_debounce_ms = 250;
/// });
/// ```
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut ReplayConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            warn!("Configuration validation failed after update: {}", e);
            *config = ReplayConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = ReplayConfig::default();
    }
}
