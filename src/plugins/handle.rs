//! PluginHandle - one discovered plugin, its embedded view and trigger control.
//!
//! A handle owns its view exclusively and lives for the rest of the process.
//! Everything the view reports back is fed through `dispatch`, which updates
//! the loading state and runs the handle's subscribers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::api::types::{ApiError, PluginName, PluginSummary};
use crate::plugins::lock;
use crate::protocols::view::PluginView;
use crate::runtime::events::{ConsoleLine, PluginEvent, PluginMessage};
use crate::runtime::path::check_plugin_dir;

/// Callback receiving the handle it was registered on
pub type HandleCallback = Box<dyn Fn(&Arc<PluginHandle>) + Send + Sync>;
/// Callback for plugin messages
pub type MessageCallback = Box<dyn Fn(&Arc<PluginHandle>, &PluginMessage) + Send + Sync>;
/// Callback for load failures, receiving the failure reason
pub type FailureCallback = Box<dyn Fn(&Arc<PluginHandle>, &str) + Send + Sync>;
/// Callback for console output
pub type ConsoleCallback = Box<dyn Fn(&Arc<PluginHandle>, &ConsoleLine) + Send + Sync>;

/// Content load progress of a plugin's view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// `load()` has not been called
    Idle,
    Loading,
    Ready,
    /// The view is blank; holds the reason
    Failed(String),
}

/// Observable state of one handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Hidden,
    Showing,
    Loading,
}

/// The button whose activation requests a switch to its plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerControl {
    pub label: String,
    /// Highlighted while the plugin is shown
    pub active: bool,
}

struct ViewState {
    shown: bool,
    load: LoadState,
}

#[derive(Default)]
struct Subscribers {
    trigger: Vec<HandleCallback>,
    ready: Vec<HandleCallback>,
    load_failed: Vec<FailureCallback>,
    messages: HashMap<String, Vec<MessageCallback>>,
    any_message: Vec<MessageCallback>,
    console: Vec<ConsoleCallback>,
}

/// Managed wrapper around one plugin's embedded view.
///
/// Subscriptions are additive and run in registration order. Callbacks must
/// not subscribe on the handle that is invoking them.
pub struct PluginHandle {
    name: PluginName,
    dir: PathBuf,
    view: Box<dyn PluginView>,
    state: Mutex<ViewState>,
    subscribers: Mutex<Subscribers>,
}

impl PluginHandle {
    /// Create the handle for plugin `name` under `base_path`.
    ///
    /// The view is not asked to load anything until `load()` is called.
    pub fn new(base_path: &Path, name: &str, view: Box<dyn PluginView>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            dir: base_path.join(name),
            view,
            state: Mutex::new(ViewState {
                shown: false,
                load: LoadState::Idle,
            }),
            subscribers: Mutex::new(Subscribers::default()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start loading the plugin's content.
    ///
    /// # Returns
    /// * `Ok(())` - The view was asked to load; completion arrives as an event
    /// * `Err(ApiError)` - The plugin directory is missing; the handle stays
    ///   present but failed
    pub fn load(&self) -> Result<(), ApiError> {
        if let Err(e) = check_plugin_dir(&self.dir) {
            lock(&self.state).load = LoadState::Failed(e.to_string());
            return Err(e);
        }

        lock(&self.state).load = LoadState::Loading;
        log::debug!("Loading plugin '{}' from {}", self.name, self.dir.display());
        self.view.load(&self.dir);
        Ok(())
    }

    /// Make this plugin visible. Showing a shown plugin does nothing.
    pub fn show(&self) {
        {
            let mut state = lock(&self.state);
            if state.shown {
                return;
            }
            state.shown = true;
        }
        self.view.show();
        log::debug!("Plugin shown: {}", self.name);
    }

    /// Hide this plugin. Hiding a hidden plugin does nothing.
    pub fn hide(&self) {
        {
            let mut state = lock(&self.state);
            if !state.shown {
                return;
            }
            state.shown = false;
        }
        self.view.hide();
        log::debug!("Plugin hidden: {}", self.name);
    }

    pub fn is_shown(&self) -> bool {
        lock(&self.state).shown
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).load == LoadState::Loading
    }

    pub fn load_state(&self) -> LoadState {
        lock(&self.state).load.clone()
    }

    /// Derived per-handle state; loading takes precedence over visibility.
    pub fn state(&self) -> HandleState {
        let state = lock(&self.state);
        if state.load == LoadState::Loading {
            HandleState::Loading
        } else if state.shown {
            HandleState::Showing
        } else {
            HandleState::Hidden
        }
    }

    pub fn trigger(&self) -> TriggerControl {
        TriggerControl {
            label: self.name.clone(),
            active: self.is_shown(),
        }
    }

    /// Open or close the diagnostic inspector for this plugin's view.
    pub fn toggle_devtools(&self) {
        log::debug!("Toggling devtools: plugin={}", self.name);
        self.view.toggle_devtools();
    }

    pub fn summary(&self, home: bool) -> PluginSummary {
        let state = lock(&self.state);
        PluginSummary {
            name: self.name.clone(),
            dir: self.dir.display().to_string(),
            shown: state.shown,
            loading: state.load == LoadState::Loading,
            home,
            failure: match &state.load {
                LoadState::Failed(reason) => Some(reason.clone()),
                _ => None,
            },
        }
    }

    /// Register a callback for trigger activation.
    pub fn on_trigger<F>(&self, callback: F)
    where
        F: Fn(&Arc<PluginHandle>) + Send + Sync + 'static,
    {
        lock(&self.subscribers).trigger.push(Box::new(callback));
    }

    /// Register a callback for messages of one kind.
    pub fn on_message<F>(&self, kind: &str, callback: F)
    where
        F: Fn(&Arc<PluginHandle>, &PluginMessage) + Send + Sync + 'static,
    {
        lock(&self.subscribers)
            .messages
            .entry(kind.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Register a callback for every message, after kind-specific callbacks.
    pub fn on_any_message<F>(&self, callback: F)
    where
        F: Fn(&Arc<PluginHandle>, &PluginMessage) + Send + Sync + 'static,
    {
        lock(&self.subscribers).any_message.push(Box::new(callback));
    }

    /// Register a callback for content-ready signals.
    pub fn on_ready<F>(&self, callback: F)
    where
        F: Fn(&Arc<PluginHandle>) + Send + Sync + 'static,
    {
        lock(&self.subscribers).ready.push(Box::new(callback));
    }

    pub fn on_load_failed<F>(&self, callback: F)
    where
        F: Fn(&Arc<PluginHandle>, &str) + Send + Sync + 'static,
    {
        lock(&self.subscribers).load_failed.push(Box::new(callback));
    }

    pub fn on_console<F>(&self, callback: F)
    where
        F: Fn(&Arc<PluginHandle>, &ConsoleLine) + Send + Sync + 'static,
    {
        lock(&self.subscribers).console.push(Box::new(callback));
    }

    /// Apply one event from this plugin's view or trigger control.
    pub fn dispatch(self: &Arc<Self>, event: PluginEvent) {
        match event {
            PluginEvent::TriggerActivated => {
                let subscribers = lock(&self.subscribers);
                for callback in &subscribers.trigger {
                    callback(self);
                }
            }
            PluginEvent::LoadStarted => {
                lock(&self.state).load = LoadState::Loading;
            }
            PluginEvent::ContentReady => {
                lock(&self.state).load = LoadState::Ready;
                log::debug!("Plugin content ready: {}", self.name);
                let subscribers = lock(&self.subscribers);
                for callback in &subscribers.ready {
                    callback(self);
                }
            }
            PluginEvent::LoadFailed { reason } => {
                lock(&self.state).load = LoadState::Failed(reason.clone());
                let subscribers = lock(&self.subscribers);
                for callback in &subscribers.load_failed {
                    callback(self, &reason);
                }
            }
            PluginEvent::Message(message) => {
                let subscribers = lock(&self.subscribers);
                if let Some(callbacks) = subscribers.messages.get(&message.kind) {
                    for callback in callbacks {
                        callback(self, &message);
                    }
                }
                for callback in &subscribers.any_message {
                    callback(self, &message);
                }
            }
            PluginEvent::Console(line) => {
                let subscribers = lock(&self.subscribers);
                for callback in &subscribers.console {
                    callback(self, &line);
                }
            }
        }
    }
}

impl std::fmt::Debug for PluginHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHandle")
            .field("name", &self.name)
            .field("dir", &self.dir)
            .field("state", &self.state())
            .finish()
    }
}
