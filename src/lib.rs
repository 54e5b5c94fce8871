//! Plugin lifecycle manager for the desktop shell.
//!
//! Discovers the UI plugins under the plugins root, orders them, keeps one
//! of them visible at a time and relays their messages to shell services.
//!
//! The core (`plugins`, `protocols`, `runtime`) is toolkit-agnostic. The
//! `desktop` feature adds the Tauri shell host, frontend-hosted views and
//! commands; the surrounding app registers them:
//!
//! ```ignore
//! tauri::Builder::default()
//!     .plugin(plugin_shell_lib::log_plugin())
//!     .invoke_handler(plugin_shell_lib::specta_builder().invoke_handler())
//!     .setup(|app| Ok(plugin_shell_lib::runtime::shell::setup(app.handle())?))
//! ```

pub mod api;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod plugins;
pub mod protocols;
pub mod runtime;

#[cfg(test)]
mod test_support;

/// Log sink for the shell: stdout plus the app log directory.
#[cfg(feature = "desktop")]
pub fn log_plugin<R: tauri::Runtime>() -> tauri::plugin::TauriPlugin<R> {
    tauri_plugin_log::Builder::new()
        .level(log::LevelFilter::Info)
        .build()
}

/// Typed command bindings for the plugin shell commands.
#[cfg(feature = "desktop")]
pub fn specta_builder() -> tauri_specta::Builder<tauri::Wry> {
    tauri_specta::Builder::<tauri::Wry>::new().commands(tauri_specta::collect_commands![
        commands::plugins::plugin_list,
        commands::plugins::plugin_activate,
        commands::plugins::plugin_view_event,
        commands::plugins::shell_set_layout,
    ])
}

/// Write the TypeScript bindings for the plugin shell commands.
#[cfg(feature = "desktop")]
pub fn export_bindings(path: &std::path::Path) -> Result<(), api::types::ApiError> {
    specta_builder()
        .export(specta_typescript::Typescript::default(), path)
        .map_err(|e| api::types::ApiError::IoError {
            message: format!("Failed to export TypeScript bindings: {e}"),
        })
}
