//! Runtime modules backing the plugin manager's protocol traits.
//!
//! The runtime domain handles the concrete side of the shell: the event
//! channel, filesystem discovery, settings, and (with the `desktop`
//! feature) the Tauri-backed shell host and embedded views.

pub mod config;
pub mod events;
pub mod fs;
pub mod path;

#[cfg(feature = "desktop")]
pub mod frontend_view;
#[cfg(feature = "desktop")]
pub mod shell;
#[cfg(feature = "desktop")]
pub mod shell_host;
