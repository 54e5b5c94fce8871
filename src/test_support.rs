//! Recording doubles for the protocol traits, shared by unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::types::{ApiError, PluginName, Severity, ShellLayout, TooltipRequest};
use crate::plugins::lock;
use crate::protocols::directory::PluginDirectory;
use crate::protocols::host::ShellHost;
use crate::protocols::view::{PluginView, ViewFactory};
use crate::runtime::events::ViewEventSink;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Load(PathBuf),
    Show,
    Hide,
    ToggleDevTools,
}

/// View that records every command it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    calls: Arc<Mutex<Vec<ViewCall>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        lock(&self.calls).clone()
    }
}

impl PluginView for RecordingView {
    fn load(&self, dir: &Path) {
        lock(&self.calls).push(ViewCall::Load(dir.to_path_buf()));
    }

    fn show(&self) {
        lock(&self.calls).push(ViewCall::Show);
    }

    fn hide(&self) {
        lock(&self.calls).push(ViewCall::Hide);
    }

    fn toggle_devtools(&self) {
        lock(&self.calls).push(ViewCall::ToggleDevTools);
    }
}

/// Factory handing out `RecordingView`s and keeping their event sinks
#[derive(Default)]
pub struct RecordingViewFactory {
    views: Mutex<HashMap<PluginName, RecordingView>>,
    sinks: Mutex<HashMap<PluginName, ViewEventSink>>,
}

impl RecordingViewFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn view(&self, name: &str) -> RecordingView {
        lock(&self.views)
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("no view created for {name}"))
    }

    pub fn sink(&self, name: &str) -> ViewEventSink {
        lock(&self.sinks)
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("no sink created for {name}"))
    }

    pub fn created(&self) -> usize {
        lock(&self.views).len()
    }
}

impl ViewFactory for RecordingViewFactory {
    fn create(&self, name: &str, events: ViewEventSink) -> Box<dyn PluginView> {
        let view = RecordingView::new();
        lock(&self.views).insert(name.to_string(), view.clone());
        lock(&self.sinks).insert(name.to_string(), events);
        Box::new(view)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Notify(String, Severity),
    Tooltip(TooltipRequest),
    LogLine {
        plugin: String,
        source_file: String,
        line: u32,
        message: String,
    },
    BeginFade,
    EndFade,
}

/// Shell host that records every call
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
    layout: ShellLayout,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_layout(header_height: f64, sidebar_width: f64) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            layout: ShellLayout {
                header_height,
                sidebar_width,
            },
        })
    }

    pub fn calls(&self) -> Vec<HostCall> {
        lock(&self.calls).clone()
    }

    pub fn notifications(&self) -> Vec<(String, Severity)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Notify(message, severity) => Some((message, severity)),
                _ => None,
            })
            .collect()
    }

    pub fn fades_started(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == HostCall::BeginFade)
            .count()
    }

    pub fn fades_ended(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == HostCall::EndFade)
            .count()
    }
}

impl ShellHost for RecordingHost {
    fn notify(&self, message: &str, severity: Severity) {
        lock(&self.calls).push(HostCall::Notify(message.to_string(), severity));
    }

    fn tooltip(&self, request: TooltipRequest) {
        lock(&self.calls).push(HostCall::Tooltip(request));
    }

    fn log_line(&self, plugin: &str, source_file: &str, line: u32, message: &str) {
        lock(&self.calls).push(HostCall::LogLine {
            plugin: plugin.to_string(),
            source_file: source_file.to_string(),
            line,
            message: message.to_string(),
        });
    }

    fn begin_cross_fade(&self) {
        lock(&self.calls).push(HostCall::BeginFade);
    }

    fn end_cross_fade(&self) {
        lock(&self.calls).push(HostCall::EndFade);
    }

    fn layout(&self) -> ShellLayout {
        self.layout
    }
}

/// Plugin directory returning a fixed listing
pub struct StaticDirectory {
    result: Result<Vec<PluginName>, ApiError>,
}

impl StaticDirectory {
    pub fn names(names: &[&str]) -> Self {
        Self {
            result: Ok(names.iter().map(|n| n.to_string()).collect()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(ApiError::PluginsDirUnreadable {
                path: "/plugins".to_string(),
                message: message.to_string(),
            }),
        }
    }
}

#[async_trait]
impl PluginDirectory for StaticDirectory {
    async fn list(&self) -> Result<Vec<PluginName>, ApiError> {
        self.result.clone()
    }
}
