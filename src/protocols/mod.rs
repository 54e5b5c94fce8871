//! Protocol layer - abstractions over the plugin manager's collaborators.
//!
//! This module provides:
//! - `ShellHost` trait: manager → shell services (notify, tooltip, log, fade)
//! - `PluginView` / `ViewFactory` traits: manager → embedded runtimes
//! - `ConfigStore` trait: synchronous settings lookup
//! - `PluginDirectory` trait: plugin discovery
//!
//! Key design principle: The plugin core never names a concrete UI toolkit.
//! The desktop layer supplies Tauri-backed implementations.

pub mod config;
pub mod directory;
pub mod host;
pub mod view;

pub use config::ConfigStore;
pub use directory::PluginDirectory;
pub use host::ShellHost;
pub use view::{PluginView, ViewFactory};
