//! Plugin Manager - discovers plugins and wires them into the shell.
//!
//! The PluginManager is created once at startup and then shared (the desktop
//! layer manages it as Tauri state). Its registry never changes membership.
//!
//! # Plugins Directory Structure
//!
//! ```text
//! plugins/
//! ├── Home/          # designated by the `homePlugin` setting
//! │   └── index.html
//! ├── Weather/
//! │   └── index.html
//! └── About/         # always displayed last
//!     └── index.html
//! ```
//!
//! # Startup
//!
//! 1. Read the `homePlugin` setting
//! 2. List the plugins root (failure is reported, registry stays empty)
//! 3. Order the names (about last, home first)
//! 4. For each name: create the view and handle, wire switching and message
//!    routing, begin loading
//! 5. The home plugin becomes current and shows itself once its content is ready

use std::sync::Arc;

use crate::api::types::{ApiError, PluginSummary, Severity};
use crate::plugins::handle::PluginHandle;
use crate::plugins::order::order_plugins;
use crate::plugins::registry::{HomePlugin, PluginRegistry};
use crate::plugins::router::MessageRouter;
use crate::plugins::transition::ActivePlugin;
use crate::protocols::config::{ConfigStore, HOME_PLUGIN_KEY};
use crate::protocols::directory::PluginDirectory;
use crate::protocols::host::ShellHost;
use crate::protocols::view::ViewFactory;
use crate::runtime::config::ManagerOptions;
use crate::runtime::events::{PluginEnvelope, PluginEvent, PluginEventSender};

/// Top-level owner of the plugin registry, the home role and the active plugin.
pub struct PluginManager {
    registry: PluginRegistry,
    home: HomePlugin,
    active: Arc<ActivePlugin>,
}

impl PluginManager {
    /// Discover, order, construct and wire every plugin.
    ///
    /// Never fails: discovery and per-plugin load problems are reported via
    /// `host.notify` and leave the registry empty or the plugin degraded.
    ///
    /// # Arguments
    ///
    /// * `options` - Plugins root, about plugin name and cross-fade duration
    /// * `config` - Settings store queried for the home plugin
    /// * `directory` - Lists plugin names under the plugins root
    /// * `views` - Creates each plugin's embedded view
    /// * `host` - Shell services for notifications, tooltips, logs and fades
    /// * `events` - Channel the views report back through
    pub async fn initialize(
        options: ManagerOptions,
        config: &dyn ConfigStore,
        directory: &dyn PluginDirectory,
        views: &dyn ViewFactory,
        host: Arc<dyn ShellHost>,
        events: &PluginEventSender,
    ) -> Self {
        let configured = match config.get_string(HOME_PLUGIN_KEY) {
            Some(name) => HomePlugin::Unresolved(name),
            None => HomePlugin::Unset,
        };
        log::debug!("Configured home plugin: {:?}", configured.name());

        let names = match directory.list().await {
            Ok(names) => names,
            Err(e) => {
                log::error!("Plugin discovery failed: {e}");
                host.notify(&e.to_string(), Severity::Error);
                Vec::new()
            }
        };

        let order = order_plugins(names, configured.name(), &options.about_plugin);
        let mut home = match order.home.clone() {
            Some(name) => HomePlugin::Unresolved(name),
            None => HomePlugin::Unset,
        };

        let active = ActivePlugin::new(host.clone(), options.cross_fade);
        let router = Arc::new(MessageRouter::new(host.clone()));

        let mut handles = Vec::with_capacity(order.names.len());
        for name in &order.names {
            let view = views.create(name, events.scoped(name));
            let handle = PluginHandle::new(&options.plugins_root, name, view);

            if order.home.as_deref() == Some(name.as_str()) {
                home = HomePlugin::Resolved(handle.clone());
                active.set_initial(handle.clone());
                Self::wire_auto_show(&handle, &active);
            }

            Self::wire(&handle, &active, &router, &host);

            if let Err(e) = handle.load() {
                log::error!("Plugin '{name}' could not be loaded: {e}");
                host.notify(
                    &format!("{name} plugin failed to load: {e}"),
                    Severity::Error,
                );
            }

            handles.push(handle);
        }

        let registry = PluginRegistry::new(handles);
        log::info!(
            "Plugins initialized: count={}, home={:?}, order={:?}",
            registry.len(),
            home.name(),
            registry.names()
        );

        Self {
            registry,
            home,
            active,
        }
    }

    /// Attach switching, message routing, console relay and failure reporting.
    fn wire(
        handle: &Arc<PluginHandle>,
        active: &Arc<ActivePlugin>,
        router: &Arc<MessageRouter>,
        host: &Arc<dyn ShellHost>,
    ) {
        let weak_active = Arc::downgrade(active);
        handle.on_trigger(move |target| {
            if let Some(active) = weak_active.upgrade() {
                active.transition(target);
            }
        });

        let message_router = router.clone();
        handle.on_any_message(move |origin, message| message_router.route(origin, message));

        let console_router = router.clone();
        handle.on_console(move |origin, line| console_router.relay_console(origin, line));

        let failure_host = host.clone();
        handle.on_load_failed(move |plugin, reason| {
            log::error!("Plugin '{}' failed to load: {reason}", plugin.name());
            failure_host.notify(
                &format!("{} plugin failed to load: {reason}", plugin.name()),
                Severity::Error,
            );
        });
    }

    /// Show the home plugin when its content is ready, unless the user has
    /// already switched away from it.
    fn wire_auto_show(handle: &Arc<PluginHandle>, active: &Arc<ActivePlugin>) {
        let weak_active = Arc::downgrade(active);
        handle.on_ready(move |home| {
            let Some(active) = weak_active.upgrade() else {
                return;
            };
            if active.is_current(home) {
                home.show();
            } else {
                log::debug!("Home plugin '{}' ready in background", home.name());
            }
        });
    }

    /// Deliver one event to the plugin it is addressed to.
    pub fn dispatch(&self, envelope: PluginEnvelope) {
        let PluginEnvelope { plugin, event } = envelope;
        match self.registry.get(&plugin) {
            Some(handle) => handle.dispatch(event),
            None => log::warn!("Event for unknown plugin '{plugin}' dropped: {event:?}"),
        }
    }

    /// Activate a plugin's trigger control programmatically.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::PluginNotFound` if no plugin has this name.
    pub fn activate(&self, name: &str) -> Result<(), ApiError> {
        let handle = self
            .registry
            .get(name)
            .ok_or_else(|| ApiError::PluginNotFound {
                name: name.to_string(),
            })?;
        handle.dispatch(PluginEvent::TriggerActivated);
        Ok(())
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn home(&self) -> &HomePlugin {
        &self.home
    }

    /// The plugin that is shown, or about to be shown once it loads.
    pub fn current(&self) -> Option<Arc<PluginHandle>> {
        self.active.current()
    }

    pub fn current_name(&self) -> Option<String> {
        self.current().map(|h| h.name().to_string())
    }

    /// Summaries of every plugin in display order.
    pub fn summaries(&self) -> Vec<PluginSummary> {
        let home = self.home.handle();
        self.registry
            .iter()
            .map(|handle| handle.summary(home.is_some_and(|h| Arc::ptr_eq(h, handle))))
            .collect()
    }
}
