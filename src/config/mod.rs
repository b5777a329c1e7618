//! Configuration management for the workspace.
//!
//! Configuration is read from the "workspace" key of a JSON settings
//! document (a value or a file), merged with defaults, validated, and kept in
//! a process-wide singleton that [`crate::service::WorkspaceService::new`]
//! snapshots.

pub mod schema;

pub use schema::{ConfigError, WorkspaceConfig};

use log::{info, warn};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Settings key holding the workspace configuration.
pub const SETTINGS_KEY: &str = "workspace";

/// Global configuration instance.
///
/// Lazily initialized with defaults on first access.
static CONFIG: Lazy<RwLock<WorkspaceConfig>> =
    Lazy::new(|| RwLock::new(WorkspaceConfig::default()));

/// Loads configuration from a JSON settings value.
///
/// Settings that fail to parse are ignored with a warning and defaults are
/// used instead; settings that parse but fail validation are an error and
/// leave the global configuration unchanged.
///
/// # Example
///
/// ```
/// use api_workspace::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "workspace": {
///         "defaultTimeout": 60
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.default_timeout, 60);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<WorkspaceConfig, ConfigError> {
    let mut config = WorkspaceConfig::default();

    if let Some(settings) = settings_json {
        if let Some(workspace_settings) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<WorkspaceConfig>(workspace_settings.clone()) {
                Ok(user_config) => {
                    config = config.merge(&user_config);
                }
                Err(e) => {
                    warn!(
                        "failed to parse {} settings: {}; using defaults",
                        SETTINGS_KEY, e
                    );
                }
            }
        }
    }

    config.validate()?;

    *CONFIG.write() = config.clone();
    info!(
        "workspace configuration loaded (default timeout {}s, {} default variables)",
        config.default_timeout,
        config.default_variables.len()
    );

    Ok(config)
}

/// Loads configuration from a JSON settings file.
///
/// Unlike [`load_config`], a file that is not valid JSON is an error.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<WorkspaceConfig, ConfigError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let settings: Value = serde_json::from_str(&contents)?;
    load_config(Some(settings))
}

/// Returns a copy of the current global configuration.
pub fn get_config() -> WorkspaceConfig {
    CONFIG.read().clone()
}

/// Applies `updater` to the global configuration.
///
/// If the result fails validation the configuration is reset to defaults.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut WorkspaceConfig),
{
    let mut config = CONFIG.write();
    updater(&mut config);

    if let Err(e) = config.validate() {
        warn!("configuration update rejected: {}; reverting to defaults", e);
        *config = WorkspaceConfig::default();
    }
}

/// Resets the global configuration to defaults.
pub fn reset_config() {
    *CONFIG.write() = WorkspaceConfig::default();
}
