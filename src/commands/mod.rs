//! Tauri command handlers organized by domain.
//!
//! Import specific commands via their submodule (e.g., `commands::plugins::plugin_list`).

pub mod plugins;
