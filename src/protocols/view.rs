//! PluginView trait: plugin manager → embedded runtime boundary.
//!
//! An embedded view hosts one plugin's content in isolation. The manager
//! only sends it commands; everything the view reports back (load
//! completion, messages, console output) arrives as `PluginEvent`s through
//! the `ViewEventSink` it was created with.

use std::path::Path;

use crate::runtime::events::ViewEventSink;

/// Commands accepted by one plugin's embedded view.
pub trait PluginView: Send + Sync {
    /// Begin loading the plugin content found in `dir`.
    ///
    /// Must not block; completion is reported as `ContentReady` or `LoadFailed`.
    fn load(&self, dir: &Path);

    /// Make the view (and its trigger control) visually active.
    fn show(&self);

    /// Make the view (and its trigger control) visually inactive.
    fn hide(&self);

    /// Open or close the diagnostic inspector bound to this view.
    fn toggle_devtools(&self);
}

/// Creates embedded views for discovered plugins.
pub trait ViewFactory: Send + Sync {
    /// Create the view for plugin `name`, wired to report through `events`.
    fn create(&self, name: &str, events: ViewEventSink) -> Box<dyn PluginView>;
}
