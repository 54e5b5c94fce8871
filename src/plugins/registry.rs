//! PluginRegistry - immutable, ordered name → handle map.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::types::PluginName;
use crate::plugins::handle::PluginHandle;

/// The home (default) plugin role.
///
/// Starts as a name read from settings and becomes a handle once that
/// plugin has been constructed.
#[derive(Debug, Clone, Default)]
pub enum HomePlugin {
    /// Nothing was discovered
    #[default]
    Unset,
    /// Known by name only; no handle constructed yet
    Unresolved(PluginName),
    Resolved(Arc<PluginHandle>),
}

impl HomePlugin {
    pub fn name(&self) -> Option<&str> {
        match self {
            HomePlugin::Unset => None,
            HomePlugin::Unresolved(name) => Some(name),
            HomePlugin::Resolved(handle) => Some(handle.name()),
        }
    }

    pub fn handle(&self) -> Option<&Arc<PluginHandle>> {
        match self {
            HomePlugin::Resolved(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, HomePlugin::Resolved(_))
    }
}

/// Registry of discovered plugins in display order.
///
/// Membership is fixed at construction; there is no add or remove.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    handles: Vec<Arc<PluginHandle>>,
    index: HashMap<PluginName, usize>,
}

impl PluginRegistry {
    /// Build the registry from handles already in display order.
    ///
    /// A repeated name keeps its first handle.
    pub fn new(handles: Vec<Arc<PluginHandle>>) -> Self {
        let mut registry = Self::default();
        for handle in handles {
            if registry.index.contains_key(handle.name()) {
                log::warn!("Duplicate plugin '{}' ignored", handle.name());
                continue;
            }
            registry
                .index
                .insert(handle.name().to_string(), registry.handles.len());
            registry.handles.push(handle);
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<&Arc<PluginHandle>> {
        self.index.get(name).map(|&i| &self.handles[i])
    }

    /// Handles in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PluginHandle>> {
        self.handles.iter()
    }

    pub fn names(&self) -> Vec<PluginName> {
        self.handles.iter().map(|h| h.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of handles currently shown; never more than one.
    pub fn shown_count(&self) -> usize {
        self.handles.iter().filter(|h| h.is_shown()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingView;
    use std::path::Path;

    fn handle(name: &str) -> Arc<PluginHandle> {
        PluginHandle::new(Path::new("/plugins"), name, Box::new(RecordingView::new()))
    }

    #[test]
    fn test_registry_keeps_order_and_lookup() {
        let registry = PluginRegistry::new(vec![handle("Home"), handle("Weather"), handle("About")]);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names(), vec!["Home", "Weather", "About"]);
        assert_eq!(registry.get("Weather").map(|h| h.name()), Some("Weather"));
        assert!(registry.get("Missing").is_none());
        assert_eq!(registry.shown_count(), 0);
    }

    #[test]
    fn test_registry_ignores_duplicates() {
        let first = handle("Home");
        let registry = PluginRegistry::new(vec![first.clone(), handle("Home")]);
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(registry.get("Home").unwrap(), &first));
    }

    #[test]
    fn test_home_plugin_states() {
        assert_eq!(HomePlugin::Unset.name(), None);

        let unresolved = HomePlugin::Unresolved("Home".to_string());
        assert_eq!(unresolved.name(), Some("Home"));
        assert!(unresolved.handle().is_none());
        assert!(!unresolved.is_resolved());

        let resolved = HomePlugin::Resolved(handle("Home"));
        assert_eq!(resolved.name(), Some("Home"));
        assert!(resolved.is_resolved());
        assert_eq!(resolved.handle().map(|h| h.name()), Some("Home"));
    }
}
