//! FsPluginDirectory - lists plugin folders under the plugins root.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::api::types::{ApiError, PluginName};
use crate::protocols::directory::PluginDirectory;
use crate::runtime::path::validate_plugin_name;

/// Filesystem-backed plugin discovery.
///
/// Every non-hidden subdirectory of the plugins root is a plugin.
/// Names are returned alphabetically so the display order is deterministic.
pub struct FsPluginDirectory {
    root: PathBuf,
}

impl FsPluginDirectory {
    /// Create a directory lister for the given plugins root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl PluginDirectory for FsPluginDirectory {
    async fn list(&self) -> Result<Vec<PluginName>, ApiError> {
        let root = self.root.clone();
        // Read directory - use spawn_blocking to avoid blocking async runtime
        tokio::task::spawn_blocking(move || list_plugin_dirs(&root))
            .await
            .map_err(|e| ApiError::IoError {
                message: format!("Failed to spawn blocking task: {e}"),
            })?
    }
}

fn list_plugin_dirs(root: &Path) -> Result<Vec<PluginName>, ApiError> {
    let unreadable = |e: std::io::Error| ApiError::PluginsDirUnreadable {
        path: root.display().to_string(),
        message: e.to_string(),
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(root).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let name = entry.file_name().to_string_lossy().into_owned();

        // Follow symlinks so linked plugin folders are discovered too
        if !entry.path().is_dir() {
            log::debug!("Skipping non-directory entry in plugins root: {name}");
            continue;
        }

        if name.starts_with('.') {
            log::debug!("Skipping hidden folder in plugins root: {name}");
            continue;
        }

        if let Err(e) = validate_plugin_name(&name) {
            log::warn!("Skipping plugin folder '{name}': {e}");
            continue;
        }

        names.push(name);
    }

    names.sort();
    Ok(names)
}
