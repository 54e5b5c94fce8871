//! Bridge types for commands and events.
//!
//! These types provide a stable API surface for the frontend,
//! hiding the plugin manager's internal handles.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use specta::Type;

/// Name of a plugin, equal to its directory name under the plugins root
pub type PluginName = String;

/// Summary of a plugin returned to the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct PluginSummary {
    /// Plugin name (also the trigger control's label)
    pub name: PluginName,
    /// Directory the plugin was loaded from
    pub dir: String,
    /// Whether the plugin's view is currently shown
    pub shown: bool,
    /// Whether the plugin's content is still loading
    pub loading: bool,
    /// Whether this plugin is the home plugin
    pub home: bool,
    /// Load failure reason, if the plugin failed to load
    pub failure: Option<String>,
}

/// Severity of a shell notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Parse a severity sent by a plugin, falling back to `Info`.
    pub fn from_value(value: Option<&Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

/// Shell chrome dimensions used to map plugin-local coordinates to shell coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct ShellLayout {
    /// Height of the shell header in pixels
    pub header_height: f64,
    /// Width of the shell sidebar in pixels
    pub sidebar_width: f64,
}

/// Tooltip anchor position.
///
/// Fields other than `top` and `left` are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    pub top: f64,
    pub left: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Tooltip request forwarded to the shell tooltip service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipRequest {
    pub content: Value,
    pub position: TooltipPosition,
    /// Any positional arguments after the position
    pub rest: Vec<Value>,
}

/// Payload of `shell/notify`
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct NotifyEvent {
    pub message: String,
    pub severity: Severity,
}

/// Payload of `shell/cross_fade`
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct CrossFadeEvent {
    /// True when the fade starts, false when the surface returns to steady state
    pub active: bool,
}

/// Command sent to a frontend-hosted embedded view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewCommand {
    Load { path: String },
    Show,
    Hide,
    ToggleDevTools,
}

/// Payload of `plugin/view_command`
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct ViewCommandEvent {
    pub plugin: PluginName,
    pub command: ViewCommand,
}

/// API errors for frontend consumption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
#[serde(tag = "type")]
pub enum ApiError {
    /// Invalid input parameter
    InvalidInput { message: String },
    /// Path does not exist or is not accessible
    PathNotFound { path: String },
    /// Path is not a directory
    PathNotDirectory { path: String },
    /// IO error during file system operation
    IoError { message: String },
    /// The plugins root could not be listed
    PluginsDirUnreadable { path: String, message: String },
    /// No plugin with this name is registered
    PluginNotFound { name: PluginName },
    /// Plugin discovery has not finished yet
    NotReady,
    /// The settings file could not be parsed
    ConfigError { message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InvalidInput { message } => write!(f, "Invalid input: {message}"),
            ApiError::PathNotFound { path } => write!(f, "Path not found: {path}"),
            ApiError::PathNotDirectory { path } => write!(f, "Path is not a directory: {path}"),
            ApiError::IoError { message } => write!(f, "IO error: {message}"),
            ApiError::PluginsDirUnreadable { path, message } => {
                write!(f, "Couldn't read plugins folder {path}: {message}")
            }
            ApiError::PluginNotFound { name } => write!(f, "Plugin not found: {name}"),
            ApiError::NotReady => write!(f, "Plugins are still being discovered"),
            ApiError::ConfigError { message } => write!(f, "Config error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}
