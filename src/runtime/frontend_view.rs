//! Frontend-hosted embedded views.
//!
//! Each plugin is rendered by an isolated webview element owned by the
//! frontend. The backend drives it with `plugin/view_command` events; the
//! frontend reports load progress, messages and console output back through
//! the `plugin_view_event` command.

use std::path::Path;

use tauri::Emitter;

use crate::api::types::{ViewCommand, ViewCommandEvent};
use crate::protocols::view::{PluginView, ViewFactory};
use crate::runtime::events::{PluginEvent, ViewEventSink};

/// Event name for commands to a plugin's embedded view
pub const EVENT_VIEW_COMMAND: &str = "plugin/view_command";

pub struct FrontendViewFactory {
    app: tauri::AppHandle,
}

impl FrontendViewFactory {
    pub fn new(app: tauri::AppHandle) -> Self {
        Self { app }
    }
}

impl ViewFactory for FrontendViewFactory {
    fn create(&self, name: &str, events: ViewEventSink) -> Box<dyn PluginView> {
        log::debug!("Creating frontend view for plugin '{name}'");
        Box::new(FrontendView {
            app: self.app.clone(),
            events,
        })
    }
}

struct FrontendView {
    app: tauri::AppHandle,
    events: ViewEventSink,
}

impl FrontendView {
    fn send(&self, command: ViewCommand) -> Result<(), tauri::Error> {
        let event = ViewCommandEvent {
            plugin: self.events.plugin().to_string(),
            command,
        };
        self.app.emit(EVENT_VIEW_COMMAND, event).inspect_err(|e| {
            log::error!(
                "Failed to emit {EVENT_VIEW_COMMAND}: {e} (plugin={})",
                self.events.plugin()
            );
        })
    }
}

impl PluginView for FrontendView {
    fn load(&self, dir: &Path) {
        let command = ViewCommand::Load {
            path: dir.display().to_string(),
        };
        if let Err(e) = self.send(command) {
            // Nothing will ever report completion for this view
            self.events.emit(PluginEvent::LoadFailed {
                reason: e.to_string(),
            });
        }
    }

    fn show(&self) {
        let _ = self.send(ViewCommand::Show);
    }

    fn hide(&self) {
        let _ = self.send(ViewCommand::Hide);
    }

    fn toggle_devtools(&self) {
        let _ = self.send(ViewCommand::ToggleDevTools);
    }
}
