//! DesktopShell - Tauri state tying the plugin manager to the app.
//!
//! `setup` is called from the app's `setup` hook. Discovery runs on the
//! async runtime, so commands may arrive before the manager exists; they
//! get `ApiError::NotReady` until it does.

use std::sync::{Arc, OnceLock};

use tauri::Manager;

use crate::api::types::ApiError;
use crate::plugins::manager::PluginManager;
use crate::runtime::config::{load_settings, ManagerOptions};
use crate::runtime::events::{self, run_event_loop, PluginEventSender};
use crate::runtime::frontend_view::FrontendViewFactory;
use crate::runtime::fs::FsPluginDirectory;
use crate::runtime::shell_host::TauriShellHost;

/// Settings file name inside the app config directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Plugin manager state managed by Tauri.
///
/// Injected via `app.manage(Arc<DesktopShell>)` in `setup`.
pub struct DesktopShell {
    manager: OnceLock<Arc<PluginManager>>,
    events: PluginEventSender,
    host: Arc<TauriShellHost>,
}

impl DesktopShell {
    /// The plugin manager, once discovery has finished.
    pub fn manager(&self) -> Result<&Arc<PluginManager>, ApiError> {
        self.manager.get().ok_or(ApiError::NotReady)
    }

    pub fn events(&self) -> &PluginEventSender {
        &self.events
    }

    pub fn host(&self) -> &Arc<TauriShellHost> {
        &self.host
    }
}

/// Start plugin discovery and the plugin event loop.
///
/// Reads `settings.json` from the app config directory and discovers plugins
/// under `<resource_dir>/plugins` unless `pluginsDir` overrides it.
///
/// # Errors
///
/// Returns `ApiError::IoError` if the app directories cannot be resolved. A
/// malformed settings file is reported as a notification, not an error.
pub fn setup(app: &tauri::AppHandle) -> Result<(), ApiError> {
    let config_dir = app
        .path()
        .app_config_dir()
        .map_err(|e| ApiError::IoError {
            message: format!("Failed to resolve app config directory: {e}"),
        })?;
    let resource_dir = app.path().resource_dir().map_err(|e| ApiError::IoError {
        message: format!("Failed to resolve resource directory: {e}"),
    })?;

    let host = TauriShellHost::new(app.clone());
    let config = load_settings(&config_dir.join(SETTINGS_FILE), host.as_ref());
    let options = ManagerOptions::from_config(&config, resource_dir.join("plugins"));
    log::info!(
        "Plugin shell starting: plugins_root={}",
        options.plugins_root.display()
    );

    let (sender, receiver) = events::channel();
    let shell = Arc::new(DesktopShell {
        manager: OnceLock::new(),
        events: sender.clone(),
        host: host.clone(),
    });
    app.manage(shell.clone());

    let views = FrontendViewFactory::new(app.clone());
    let directory = FsPluginDirectory::new(options.plugins_root.clone());

    tauri::async_runtime::spawn(async move {
        let manager = Arc::new(
            PluginManager::initialize(options, &config, &directory, &views, host, &sender).await,
        );
        if shell.manager.set(manager.clone()).is_err() {
            log::warn!("Plugin manager already initialized, keeping the first one");
        }
        run_event_loop(manager, receiver).await;
    });

    Ok(())
}
