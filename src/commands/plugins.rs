//! Plugin-related Tauri commands.
//!
//! These commands provide the frontend API for the plugin shell: listing
//! plugins, clicking their trigger controls, relaying embedded view events
//! and reporting the chrome layout.

use std::sync::Arc;

use tauri::State;

use crate::api::types::{ApiError, PluginSummary, ShellLayout};
use crate::runtime::events::PluginEvent;
use crate::runtime::shell::DesktopShell;

/// List plugins in display order.
///
/// # Errors
///
/// Returns `ApiError::NotReady` while plugin discovery is still running.
#[tauri::command]
#[specta::specta]
pub async fn plugin_list(shell: State<'_, Arc<DesktopShell>>) -> Result<Vec<PluginSummary>, ApiError> {
    let summaries = shell.manager()?.summaries();
    log::debug!("plugin_list result: count={}", summaries.len());
    Ok(summaries)
}

/// Activate a plugin's trigger control.
///
/// The activation is queued behind any pending plugin events; a switch that
/// the transition guard rejects is silently ignored.
///
/// # Errors
///
/// Returns `ApiError::NotReady` while discovery is running and
/// `ApiError::PluginNotFound` for an unknown plugin.
#[tauri::command]
#[specta::specta]
pub async fn plugin_activate(
    shell: State<'_, Arc<DesktopShell>>,
    name: String,
) -> Result<(), ApiError> {
    log::debug!("plugin_activate called: name={name}");

    if shell.manager()?.registry().get(&name).is_none() {
        return Err(ApiError::PluginNotFound { name });
    }

    shell.events().send(&name, PluginEvent::TriggerActivated);
    Ok(())
}

/// Relay an event from a plugin's embedded view.
///
/// Accepted before discovery finishes; events are queued until the plugin
/// manager starts consuming them.
#[tauri::command]
#[specta::specta]
pub async fn plugin_view_event(
    shell: State<'_, Arc<DesktopShell>>,
    name: String,
    event: PluginEvent,
) -> Result<(), ApiError> {
    log::trace!("plugin_view_event called: name={name}, event={event:?}");
    shell.events().send(&name, event);
    Ok(())
}

/// Report the shell header height and sidebar width.
#[tauri::command]
#[specta::specta]
pub async fn shell_set_layout(
    shell: State<'_, Arc<DesktopShell>>,
    layout: ShellLayout,
) -> Result<(), ApiError> {
    shell.host().set_layout(layout);
    Ok(())
}
