//! ShellHost trait: plugin manager → shell services boundary.
//!
//! This trait defines how the plugin manager reaches the shell's
//! notification, tooltip, log and display-surface services.
//!
//! Key design principle: The plugin manager does NOT render anything.
//! Rendering is owned by the shell; the manager only asks for it.

use crate::api::types::{Severity, ShellLayout, TooltipRequest};

/// Callback interface into the surrounding application shell.
///
/// Implemented by the desktop layer (`TauriShellHost`) and by recording
/// doubles in tests. All calls are fire-and-forget: the shell reports its
/// own rendering failures, nothing flows back into the plugin manager.
pub trait ShellHost: Send + Sync {
    /// Show a notification to the user.
    ///
    /// This is the only user-visible error channel of the plugin manager.
    fn notify(&self, message: &str, severity: Severity);

    /// Show a tooltip at a shell-global position.
    fn tooltip(&self, request: TooltipRequest);

    /// Write a console line produced by a plugin's runtime to the host log.
    ///
    /// # Arguments
    /// * `plugin` - Name of the plugin that logged
    /// * `source_file` - Basename of the file that produced the line
    /// * `line` - Line number within `source_file`
    /// * `message` - The logged text
    fn log_line(&self, plugin: &str, source_file: &str, line: u32, message: &str);

    /// Start the cross-fade effect on the shared content surface.
    fn begin_cross_fade(&self);

    /// Return the content surface to its steady visual state.
    fn end_cross_fade(&self);

    /// Current shell chrome dimensions.
    fn layout(&self) -> ShellLayout;
}
