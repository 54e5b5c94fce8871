//! TauriShellHost - Runtime layer implementation of the ShellHost trait.
//!
//! Translates plugin manager requests into Tauri events; the frontend owns
//! the notification, tooltip and cross-fade rendering.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tauri::Emitter;

use crate::api::types::{CrossFadeEvent, NotifyEvent, Severity, ShellLayout, TooltipRequest};
use crate::plugins::lock;
use crate::protocols::host::ShellHost;

/// Event name for shell notifications
pub const EVENT_NOTIFY: &str = "shell/notify";

/// Event name for tooltips
pub const EVENT_TOOLTIP: &str = "shell/tooltip";

/// Event name for the content surface cross-fade
pub const EVENT_CROSS_FADE: &str = "shell/cross_fade";

/// Log target for plugin console output
pub const PLUGIN_CONSOLE_TARGET: &str = "plugin_console";

/// Shell host backed by the Tauri frontend.
pub struct TauriShellHost {
    /// Tauri application handle for emitting events
    app: tauri::AppHandle,
    /// Chrome dimensions reported by the frontend
    layout: Mutex<ShellLayout>,
}

impl TauriShellHost {
    pub fn new(app: tauri::AppHandle) -> Arc<Self> {
        Arc::new(Self {
            app,
            layout: Mutex::new(ShellLayout::default()),
        })
    }

    /// Record new chrome dimensions (sent by the frontend on resize).
    pub fn set_layout(&self, layout: ShellLayout) {
        log::debug!(
            "Shell layout updated: header_height={}, sidebar_width={}",
            layout.header_height,
            layout.sidebar_width
        );
        *lock(&self.layout) = layout;
    }

    fn emit<S: Serialize + Clone>(&self, event: &str, payload: S) {
        if let Err(e) = self.app.emit(event, payload) {
            log::error!("Failed to emit {event} event: {e}");
        } else {
            log::trace!("Emitted {event}");
        }
    }
}

impl ShellHost for TauriShellHost {
    fn notify(&self, message: &str, severity: Severity) {
        self.emit(
            EVENT_NOTIFY,
            NotifyEvent {
                message: message.to_string(),
                severity,
            },
        );
    }

    fn tooltip(&self, request: TooltipRequest) {
        self.emit(EVENT_TOOLTIP, request);
    }

    fn log_line(&self, plugin: &str, source_file: &str, line: u32, message: &str) {
        log::info!(
            target: PLUGIN_CONSOLE_TARGET,
            "{plugin} plugin logged from {source_file}({line}): {message}"
        );
    }

    fn begin_cross_fade(&self) {
        self.emit(EVENT_CROSS_FADE, CrossFadeEvent { active: true });
    }

    fn end_cross_fade(&self) {
        self.emit(EVENT_CROSS_FADE, CrossFadeEvent { active: false });
    }

    fn layout(&self) -> ShellLayout {
        *lock(&self.layout)
    }
}
