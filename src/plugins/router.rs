//! MessageRouter - turns plugin messages into shell service calls.
//!
//! | kind           | action                                            |
//! |----------------|---------------------------------------------------|
//! | `notification` | `ShellHost::notify(message, severity)`            |
//! | `tooltip`      | `ShellHost::tooltip`, position shifted by chrome  |
//! | `devtools`     | toggle the sender's inspector                     |
//! | anything else  | error notification naming the kind                |
//!
//! Routing never fails: malformed messages end up as error notifications.

use std::sync::Arc;

use serde_json::Value;

use crate::api::types::{Severity, TooltipPosition, TooltipRequest};
use crate::plugins::handle::PluginHandle;
use crate::protocols::host::ShellHost;
use crate::runtime::events::{ConsoleLine, PluginMessage};
use crate::runtime::path::source_basename;

pub const KIND_NOTIFICATION: &str = "notification";
pub const KIND_TOOLTIP: &str = "tooltip";
pub const KIND_DEVTOOLS: &str = "devtools";

/// Routes messages from plugin runtimes to the shell.
pub struct MessageRouter {
    host: Arc<dyn ShellHost>,
}

impl MessageRouter {
    pub fn new(host: Arc<dyn ShellHost>) -> Self {
        Self { host }
    }

    /// Dispatch one message sent by `origin`.
    pub fn route(&self, origin: &PluginHandle, message: &PluginMessage) {
        log::trace!(
            "Plugin message: plugin={}, kind={}, args={}",
            origin.name(),
            message.kind,
            message.args.len()
        );

        match message.kind.as_str() {
            KIND_NOTIFICATION => self.notification(&message.args),
            KIND_TOOLTIP => self.tooltip(origin, &message.args),
            KIND_DEVTOOLS => origin.toggle_devtools(),
            unknown => {
                log::warn!(
                    "Unknown plugin message: plugin={}, kind={unknown}",
                    origin.name()
                );
                self.host
                    .notify(&format!("Unknown plugin message: {unknown}"), Severity::Error);
            }
        }
    }

    /// Relay a console line from `origin` to the host log.
    pub fn relay_console(&self, origin: &PluginHandle, line: &ConsoleLine) {
        self.host.log_line(
            origin.name(),
            source_basename(&line.source_id),
            line.line,
            &line.message,
        );
    }

    fn notification(&self, args: &[Value]) {
        let message = match args.first() {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let severity = Severity::from_value(args.get(1));
        self.host.notify(&message, severity);
    }

    fn tooltip(&self, origin: &PluginHandle, args: &[Value]) {
        let position = args
            .get(1)
            .and_then(|value| serde_json::from_value::<TooltipPosition>(value.clone()).ok());

        let Some(mut position) = position else {
            log::warn!("Malformed tooltip message: plugin={}", origin.name());
            self.host.notify(
                &format!("Malformed tooltip message from {}", origin.name()),
                Severity::Error,
            );
            return;
        };

        // Plugin coordinates are relative to its view; the view sits below
        // the header and right of the sidebar.
        let layout = self.host.layout();
        position.top += layout.header_height;
        position.left += layout.sidebar_width;

        self.host.tooltip(TooltipRequest {
            content: args.first().cloned().unwrap_or(Value::Null),
            position,
            rest: args.iter().skip(2).cloned().collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{HostCall, RecordingHost, RecordingView, ViewCall};
    use serde_json::{json, Map};
    use std::path::Path;

    fn origin() -> (Arc<PluginHandle>, RecordingView) {
        let view = RecordingView::new();
        let handle = PluginHandle::new(Path::new("/plugins"), "Weather", Box::new(view.clone()));
        (handle, view)
    }

    #[test]
    fn test_notification_forwarded() {
        let host = RecordingHost::new();
        let router = MessageRouter::new(host.clone());
        let (handle, _) = origin();

        router.route(
            &handle,
            &PluginMessage::new("notification", vec![json!("Saved"), json!("success")]),
        );
        router.route(&handle, &PluginMessage::new("notification", vec![json!("Plain")]));

        assert_eq!(
            host.notifications(),
            vec![
                ("Saved".to_string(), Severity::Success),
                ("Plain".to_string(), Severity::Info)
            ]
        );
    }

    #[test]
    fn test_tooltip_offsets_shifted_by_chrome() {
        let host = RecordingHost::with_layout(40.0, 60.0);
        let router = MessageRouter::new(host.clone());
        let (handle, _) = origin();

        router.route(
            &handle,
            &PluginMessage::new("tooltip", vec![json!("text"), json!({"top": 10, "left": 20})]),
        );

        assert_eq!(
            host.calls(),
            vec![HostCall::Tooltip(TooltipRequest {
                content: json!("text"),
                position: TooltipPosition {
                    top: 50.0,
                    left: 80.0,
                    extra: Map::new(),
                },
                rest: Vec::new(),
            })]
        );
    }

    #[test]
    fn test_tooltip_keeps_extra_fields_and_args() {
        let host = RecordingHost::with_layout(40.0, 60.0);
        let router = MessageRouter::new(host.clone());
        let (handle, _) = origin();

        router.route(
            &handle,
            &PluginMessage::new(
                "tooltip",
                vec![
                    json!("text"),
                    json!({"top": 0, "left": 0, "arrow": "up"}),
                    json!(1500),
                ],
            ),
        );

        match &host.calls()[..] {
            [HostCall::Tooltip(request)] => {
                assert_eq!(request.position.extra.get("arrow"), Some(&json!("up")));
                assert_eq!(request.rest, vec![json!(1500)]);
            }
            calls => panic!("Expected one tooltip, got {calls:?}"),
        }
    }

    #[test]
    fn test_malformed_tooltip_notifies() {
        let host = RecordingHost::with_layout(40.0, 60.0);
        let router = MessageRouter::new(host.clone());
        let (handle, _) = origin();

        router.route(&handle, &PluginMessage::new("tooltip", vec![json!("text")]));
        router.route(
            &handle,
            &PluginMessage::new("tooltip", vec![json!("text"), json!({"top": "x"})]),
        );

        let notifications = host.notifications();
        assert_eq!(notifications.len(), 2);
        assert!(notifications
            .iter()
            .all(|(m, s)| m.contains("Weather") && *s == Severity::Error));
        assert_eq!(host.calls().len(), 2);
    }

    #[test]
    fn test_devtools_toggles_origin() {
        let host = RecordingHost::new();
        let router = MessageRouter::new(host.clone());
        let (handle, view) = origin();

        router.route(&handle, &PluginMessage::new("devtools", vec![]));

        assert_eq!(view.calls(), vec![ViewCall::ToggleDevTools]);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_unknown_kind_single_error_notification() {
        let host = RecordingHost::new();
        let router = MessageRouter::new(host.clone());
        let (handle, view) = origin();

        router.route(&handle, &PluginMessage::new("foo", vec![json!(1)]));

        let calls = host.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            HostCall::Notify(message, Severity::Error) => assert!(message.contains("foo")),
            other => panic!("Expected error notification, got {other:?}"),
        }
        assert!(view.calls().is_empty());
    }

    #[test]
    fn test_console_relay_uses_basename() {
        let host = RecordingHost::new();
        let router = MessageRouter::new(host.clone());
        let (handle, _) = origin();

        router.relay_console(
            &handle,
            &ConsoleLine {
                source_id: "file:///app/plugins/Weather/js/forecast.js".to_string(),
                line: 42,
                message: "fetched".to_string(),
            },
        );

        assert_eq!(
            host.calls(),
            vec![HostCall::LogLine {
                plugin: "Weather".to_string(),
                source_file: "forecast.js".to_string(),
                line: 42,
                message: "fetched".to_string(),
            }]
        );
    }
}
