//! ConfigStore trait: synchronous access to the persisted shell settings.

use std::collections::HashMap;

use serde_json::Value;

/// Settings key holding the designated home plugin's name
pub const HOME_PLUGIN_KEY: &str = "homePlugin";

/// Settings key overriding the plugins root directory
pub const PLUGINS_DIR_KEY: &str = "pluginsDir";

/// Settings key overriding the cross-fade duration in milliseconds
pub const CROSS_FADE_MS_KEY: &str = "crossFadeMs";

/// Request/response access to configuration values.
///
/// Queried synchronously during startup; a missing key is `None`.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    /// Convenience accessor for string settings.
    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl ConfigStore for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        HashMap::get(self, key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_config_store_get_string() {
        let mut store = HashMap::new();
        store.insert(HOME_PLUGIN_KEY.to_string(), json!("Weather"));
        store.insert(CROSS_FADE_MS_KEY.to_string(), json!(200));

        assert_eq!(store.get_string(HOME_PLUGIN_KEY), Some("Weather".to_string()));
        assert_eq!(store.get_string(CROSS_FADE_MS_KEY), None);
        assert_eq!(store.get_string("missing"), None);
    }
}
