//! Plugin event channel - the single queue feeding the plugin manager.
//!
//! Every asynchronous input (trigger clicks, content-load progress, plugin
//! messages, console output) is posted here and consumed one at a time by
//! `run_event_loop`, so the manager never observes two events concurrently.
//!
//! # Flow
//!
//! 1. A view (or the shell) posts a `PluginEvent` through a `ViewEventSink`
//! 2. The envelope is queued on an unbounded tokio mpsc channel
//! 3. `run_event_loop` receives envelopes in arrival order
//! 4. `PluginManager::dispatch` hands each one to the named plugin's handle

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use specta::Type;
use tokio::sync::mpsc;

use crate::api::types::PluginName;
use crate::plugins::manager::PluginManager;

/// Structured message emitted by a plugin's embedded runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct PluginMessage {
    /// Message class, e.g. "notification" or "tooltip"
    pub kind: String,
    /// Positional arguments
    #[serde(default)]
    pub args: Vec<Value>,
}

impl PluginMessage {
    pub fn new(kind: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            kind: kind.into(),
            args,
        }
    }
}

/// Console output produced by a plugin's embedded runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleLine {
    /// Full path or URL of the source file that logged
    pub source_id: String,
    pub line: u32,
    pub message: String,
}

/// Input events for a single plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PluginEvent {
    /// The plugin's trigger control was activated by the user
    TriggerActivated,
    /// The view started (re)loading its content
    LoadStarted,
    /// The view finished loading its content
    ContentReady,
    /// The view could not load its content
    LoadFailed { reason: String },
    /// The plugin runtime sent a structured message
    Message(PluginMessage),
    /// The plugin runtime wrote to its console
    Console(ConsoleLine),
}

/// A `PluginEvent` addressed to a plugin by name
#[derive(Debug, Clone, PartialEq)]
pub struct PluginEnvelope {
    pub plugin: PluginName,
    pub event: PluginEvent,
}

/// Receiving half of the plugin event channel
pub type PluginEventReceiver = mpsc::UnboundedReceiver<PluginEnvelope>;

/// Sending half of the plugin event channel.
///
/// Cheap to clone; every clone feeds the same single consumer.
#[derive(Debug, Clone)]
pub struct PluginEventSender {
    tx: mpsc::UnboundedSender<PluginEnvelope>,
}

/// Create the plugin event channel.
pub fn channel() -> (PluginEventSender, PluginEventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PluginEventSender { tx }, rx)
}

impl PluginEventSender {
    /// Post an event for `plugin`.
    ///
    /// Returns false if the event loop has already stopped.
    pub fn send(&self, plugin: &str, event: PluginEvent) -> bool {
        let envelope = PluginEnvelope {
            plugin: plugin.to_string(),
            event,
        };
        if self.tx.send(envelope).is_err() {
            log::warn!("Plugin event dropped, event loop stopped: plugin={plugin}");
            return false;
        }
        true
    }

    /// Create a sink that posts events on behalf of one plugin.
    pub fn scoped(&self, plugin: &str) -> ViewEventSink {
        ViewEventSink {
            plugin: plugin.to_string(),
            sender: self.clone(),
        }
    }
}

/// Event sink handed to one plugin's embedded view
#[derive(Debug, Clone)]
pub struct ViewEventSink {
    plugin: PluginName,
    sender: PluginEventSender,
}

impl ViewEventSink {
    /// The plugin this sink posts for.
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    pub fn emit(&self, event: PluginEvent) -> bool {
        self.sender.send(&self.plugin, event)
    }
}

/// Drain the plugin event channel into the manager until every sender is dropped.
///
/// This is the only consumer of plugin events; it dispatches strictly in
/// arrival order.
pub async fn run_event_loop(manager: Arc<PluginManager>, mut events: PluginEventReceiver) {
    log::debug!("Plugin event loop started");
    while let Some(envelope) = events.recv().await {
        manager.dispatch(envelope);
    }
    log::debug!("Plugin event loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (sender, mut rx) = channel();
        let home = sender.scoped("Home");
        assert_eq!(home.plugin(), "Home");

        assert!(home.emit(PluginEvent::LoadStarted));
        assert!(home.emit(PluginEvent::ContentReady));
        assert!(sender.send("News", PluginEvent::TriggerActivated));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.plugin, "Home");
        assert_eq!(first.event, PluginEvent::LoadStarted);
        assert_eq!(rx.recv().await.unwrap().event, PluginEvent::ContentReady);
        let third = rx.recv().await.unwrap();
        assert_eq!(third.plugin, "News");
        assert_eq!(third.event, PluginEvent::TriggerActivated);
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (sender, rx) = channel();
        drop(rx);
        assert!(!sender.send("Home", PluginEvent::ContentReady));
    }

    #[test]
    fn test_plugin_event_from_frontend_json() {
        let event: PluginEvent = serde_json::from_value(json!({
            "type": "message",
            "kind": "tooltip",
            "args": ["hi", {"top": 1, "left": 2}]
        }))
        .unwrap();
        assert_eq!(
            event,
            PluginEvent::Message(PluginMessage::new(
                "tooltip",
                vec![json!("hi"), json!({"top": 1, "left": 2})]
            ))
        );

        let event: PluginEvent = serde_json::from_value(json!({
            "type": "console",
            "sourceId": "file:///plugins/Home/js/index.js",
            "line": 12,
            "message": "ready"
        }))
        .unwrap();
        assert!(matches!(event, PluginEvent::Console(ConsoleLine { line: 12, .. })));

        let event: PluginEvent =
            serde_json::from_value(json!({"type": "loadFailed", "reason": "404"})).unwrap();
        assert_eq!(
            event,
            PluginEvent::LoadFailed {
                reason: "404".to_string()
            }
        );
    }
}
