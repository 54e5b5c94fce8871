//! Settings-file configuration store and plugin manager options.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Map, Value};

use crate::api::types::{ApiError, PluginName, Severity};
use crate::protocols::config::{ConfigStore, CROSS_FADE_MS_KEY, PLUGINS_DIR_KEY};
use crate::protocols::host::ShellHost;

/// Name of the plugin that always sorts last
pub const DEFAULT_ABOUT_PLUGIN: &str = "About";

/// Default duration of the switch cross-fade
pub const DEFAULT_CROSS_FADE: Duration = Duration::from_millis(170);

/// Configuration store backed by a flat JSON object on disk.
///
/// The file is read once; a missing file behaves as an empty store.
#[derive(Debug, Clone, Default)]
pub struct JsonConfigStore {
    values: Map<String, Value>,
}

impl JsonConfigStore {
    /// Load settings from `path`.
    ///
    /// # Returns
    /// * `Ok(JsonConfigStore)` - Parsed settings, empty if the file does not exist
    /// * `Err(ApiError::ConfigError)` - The file is not a JSON object
    /// * `Err(ApiError::IoError)` - The file exists but could not be read
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ApiError::IoError {
                    message: format!("Failed to read settings '{}': {e}", path.display()),
                })
            }
        };

        Self::from_json(&content).map_err(|e| ApiError::ConfigError {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Parse settings from a JSON object string.
    pub fn from_json(content: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(values)) => Ok(Self { values }),
            Ok(_) => Err("settings must be a JSON object".to_string()),
            Err(e) => Err(format!("invalid JSON: {e}")),
        }
    }
}

/// Load the startup settings, falling back to defaults.
///
/// An unreadable or malformed settings file is reported through `host` and
/// treated as empty so the shell still starts.
pub fn load_settings(path: &Path, host: &dyn ShellHost) -> JsonConfigStore {
    match JsonConfigStore::load(path) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Settings ignored, using defaults: {e}");
            host.notify(&format!("Settings ignored: {e}"), Severity::Error);
            JsonConfigStore::default()
        }
    }
}

impl ConfigStore for JsonConfigStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

/// Tunables of the plugin manager.
#[derive(Debug, Clone)]
pub struct ManagerOptions {
    /// Directory whose subdirectories are plugins
    pub plugins_root: PathBuf,
    /// Plugin pinned to the end of the display order
    pub about_plugin: PluginName,
    /// How long the content surface stays in its cross-fade state
    pub cross_fade: Duration,
}

impl ManagerOptions {
    /// Options with defaults for the given plugins root.
    pub fn new(plugins_root: impl Into<PathBuf>) -> Self {
        Self {
            plugins_root: plugins_root.into(),
            about_plugin: DEFAULT_ABOUT_PLUGIN.to_string(),
            cross_fade: DEFAULT_CROSS_FADE,
        }
    }

    /// Options with `pluginsDir` and `crossFadeMs` overrides applied from settings.
    ///
    /// A relative `pluginsDir` is resolved against `default_root`'s parent.
    pub fn from_config(config: &dyn ConfigStore, default_root: impl Into<PathBuf>) -> Self {
        let mut options = Self::new(default_root);

        if let Some(dir) = config.get_string(PLUGINS_DIR_KEY) {
            let dir = PathBuf::from(dir);
            options.plugins_root = if dir.is_absolute() {
                dir
            } else {
                options
                    .plugins_root
                    .parent()
                    .map(|parent| parent.join(&dir))
                    .unwrap_or(dir)
            };
        }

        if let Some(value) = config.get(CROSS_FADE_MS_KEY) {
            match value.as_u64() {
                Some(ms) => options.cross_fade = Duration::from_millis(ms),
                None => log::warn!("Ignoring non-numeric {CROSS_FADE_MS_KEY} setting: {value}"),
            }
        }

        options
    }
}
