//! Path utilities for the plugins root and plugin directories.

use std::path::Path;

use crate::api::types::ApiError;

/// Validate a plugin directory name.
///
/// Any folder name is a plugin name except `.`, `..`, hidden names and names
/// that could not come from a single path component.
pub fn validate_plugin_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::InvalidInput {
            message: "Plugin name cannot be empty".to_string(),
        });
    }

    if name.contains('/') || name.contains('\\') {
        return Err(ApiError::InvalidInput {
            message: "Plugin name contains invalid path characters".to_string(),
        });
    }

    if name.starts_with('.') {
        return Err(ApiError::InvalidInput {
            message: "Plugin name cannot start with a dot".to_string(),
        });
    }

    Ok(())
}

/// Check that a plugin's directory exists and is a directory.
pub fn check_plugin_dir(dir: &Path) -> Result<(), ApiError> {
    if !dir.exists() {
        return Err(ApiError::PathNotFound {
            path: dir.display().to_string(),
        });
    }

    if !dir.is_dir() {
        return Err(ApiError::PathNotDirectory {
            path: dir.display().to_string(),
        });
    }

    Ok(())
}

/// Strip everything up to the last `/` or `\` from a source id.
///
/// Works on both filesystem paths and `file://` URLs.
pub fn source_basename(source_id: &str) -> &str {
    source_id.rsplit(['/', '\\']).next().unwrap_or(source_id)
}
