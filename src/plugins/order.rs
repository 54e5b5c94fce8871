//! Display order of discovered plugins.
//!
//! Two pinned positions, applied in this order:
//! 1. The about plugin is swapped to the end.
//! 2. The configured home plugin is swapped to the front.
//!
//! Every other position keeps whatever order discovery produced. Because the
//! swaps run in sequence, a home plugin that is also the about plugin ends up
//! first.

use crate::api::types::PluginName;

/// Result of ordering the discovered plugins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOrder {
    /// Plugin names in display order
    pub names: Vec<PluginName>,
    /// The resolved home plugin; `None` only when nothing was discovered
    pub home: Option<PluginName>,
}

/// Order discovered plugin names and resolve the home plugin.
///
/// If `configured_home` is not among `names`, the first entry (after the
/// about swap) becomes the home plugin.
pub fn order_plugins(
    mut names: Vec<PluginName>,
    configured_home: Option<&str>,
    about_plugin: &str,
) -> PluginOrder {
    if let Some(about_index) = names.iter().position(|n| n == about_plugin) {
        let last = names.len() - 1;
        names.swap(about_index, last);
    }

    let configured_index =
        configured_home.and_then(|home| names.iter().position(|n| n == home));

    let home = match configured_index {
        Some(home_index) => {
            names.swap(home_index, 0);
            Some(names[0].clone())
        }
        None => {
            let fallback = names.first().cloned();
            if let Some(fallback) = &fallback {
                log::info!(
                    "Home plugin {configured_home:?} not installed, defaulting to '{fallback}'"
                );
            }
            fallback
        }
    };

    PluginOrder { names, home }
}
