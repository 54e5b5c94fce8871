//! PluginDirectory trait: plugin manager → filesystem boundary.

use async_trait::async_trait;

use crate::api::types::{ApiError, PluginName};

/// Source of plugin names, listed once at startup.
///
/// Implemented by `FsPluginDirectory` for the real plugins root.
#[async_trait]
pub trait PluginDirectory: Send + Sync {
    /// List the discovered plugin names in discovery order.
    ///
    /// # Returns
    /// * `Ok(Vec<PluginName>)` - Plugin directory names
    /// * `Err(ApiError)` - The plugins root could not be listed
    async fn list(&self) -> Result<Vec<PluginName>, ApiError>;
}
