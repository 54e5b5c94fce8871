//! Plugin management domain.
//!
//! Discovers the plugins under the plugins root, orders them, and keeps
//! exactly one of them visible at a time.
//!
//! - `order`: display order and home plugin resolution
//! - `handle`: one plugin's view, trigger control and subscriptions
//! - `transition`: the active plugin and the switch between plugins
//! - `router`: plugin messages → shell services
//! - `registry`: immutable name → handle map plus the home role
//! - `manager`: discovery and wiring

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod handle;
pub mod manager;
pub mod order;
pub mod registry;
pub mod router;
pub mod transition;

pub use handle::PluginHandle;
pub use manager::PluginManager;
pub use registry::{HomePlugin, PluginRegistry};

/// Lock a std mutex, recovering the data if a callback panicked while holding it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
