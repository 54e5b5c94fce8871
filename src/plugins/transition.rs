//! The active plugin and the switch between plugins.
//!
//! `ActivePlugin` is the only place the "current plugin" is stored, and
//! `transition` is the only code that changes it after startup. The slot's
//! mutex is held for the whole switch, so hide/reassign/show never interleave
//! with another switch.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::plugins::handle::PluginHandle;
use crate::plugins::lock;
use crate::protocols::host::ShellHost;

/// Why a transition did or did not happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The target became the active plugin
    Switched {
        from: Option<String>,
        to: String,
    },
    /// The target already is the active plugin
    AlreadyActive,
    /// The active plugin is still loading
    CurrentLoading,
}

/// Holder of the currently active plugin handle.
pub struct ActivePlugin {
    current: Mutex<Option<Arc<PluginHandle>>>,
    host: Arc<dyn ShellHost>,
    cross_fade: Duration,
}

impl ActivePlugin {
    pub fn new(host: Arc<dyn ShellHost>, cross_fade: Duration) -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(None),
            host,
            cross_fade,
        })
    }

    pub fn current(&self) -> Option<Arc<PluginHandle>> {
        lock(&self.current).clone()
    }

    pub fn is_current(&self, handle: &Arc<PluginHandle>) -> bool {
        lock(&self.current)
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, handle))
    }

    /// Mark the home plugin as current during startup, before anything is shown.
    pub(crate) fn set_initial(&self, handle: Arc<PluginHandle>) {
        let mut current = lock(&self.current);
        if let Some(existing) = current.as_ref() {
            log::warn!(
                "Initial plugin already set to '{}', ignoring '{}'",
                existing.name(),
                handle.name()
            );
            return;
        }
        *current = Some(handle);
    }

    /// Switch the visible plugin to `target`.
    ///
    /// Rejected without side effects when `target` is already active or the
    /// active plugin is still loading. Otherwise starts the cross-fade, hides
    /// the active plugin and shows `target`.
    pub fn transition(&self, target: &Arc<PluginHandle>) -> TransitionOutcome {
        let mut current = lock(&self.current);

        if let Some(active) = current.as_ref() {
            if Arc::ptr_eq(active, target) {
                log::debug!("Ignoring switch to active plugin '{}'", target.name());
                return TransitionOutcome::AlreadyActive;
            }
            if active.is_loading() {
                log::debug!(
                    "Ignoring switch to '{}' while '{}' is loading",
                    target.name(),
                    active.name()
                );
                return TransitionOutcome::CurrentLoading;
            }
        }

        self.start_cross_fade();

        let from = current.take().map(|previous| {
            previous.hide();
            previous.name().to_string()
        });
        *current = Some(target.clone());
        target.show();

        log::info!("Switched plugin: from={from:?}, to={}", target.name());
        TransitionOutcome::Switched {
            from,
            to: target.name().to_string(),
        }
    }

    /// Begin the cosmetic fade and schedule its end; never waits for the switch.
    fn start_cross_fade(&self) {
        self.host.begin_cross_fade();

        let host = self.host.clone();
        let duration = self.cross_fade;
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    tokio::time::sleep(duration).await;
                    host.end_cross_fade();
                });
            }
            Err(_) => {
                log::debug!("No async runtime for cross-fade timer, ending fade immediately");
                host.end_cross_fade();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::handle::HandleState;
    use crate::runtime::events::PluginEvent;
    use crate::test_support::{RecordingHost, RecordingView, ViewCall};
    use std::path::Path;

    fn handle(name: &str) -> (Arc<PluginHandle>, RecordingView) {
        let view = RecordingView::new();
        let handle = PluginHandle::new(Path::new("/plugins"), name, Box::new(view.clone()));
        (handle, view)
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_hides_previous_and_shows_target() {
        let host = RecordingHost::new();
        let active = ActivePlugin::new(host.clone(), Duration::from_millis(170));
        let (a, a_view) = handle("A");
        let (b, b_view) = handle("B");

        active.set_initial(a.clone());
        a.show();

        let outcome = active.transition(&b);

        assert_eq!(
            outcome,
            TransitionOutcome::Switched {
                from: Some("A".to_string()),
                to: "B".to_string()
            }
        );
        assert!(!a.is_shown());
        assert!(b.is_shown());
        assert!(active.is_current(&b));
        assert_eq!(a_view.calls(), vec![ViewCall::Show, ViewCall::Hide]);
        assert_eq!(b_view.calls(), vec![ViewCall::Show]);
        assert_eq!(host.fades_started(), 1);
        assert_eq!(host.fades_ended(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(host.fades_ended(), 1);
    }

    #[tokio::test]
    async fn test_switch_to_active_is_noop() {
        let host = RecordingHost::new();
        let active = ActivePlugin::new(host.clone(), Duration::from_millis(170));
        let (a, a_view) = handle("A");
        active.set_initial(a.clone());
        a.show();

        assert_eq!(active.transition(&a), TransitionOutcome::AlreadyActive);
        assert!(a.is_shown());
        assert!(active.is_current(&a));
        assert_eq!(a_view.calls(), vec![ViewCall::Show]);
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_switch_while_current_loading_is_noop() {
        let host = RecordingHost::new();
        let active = ActivePlugin::new(host.clone(), Duration::from_millis(170));
        let (a, _) = handle("A");
        let (b, b_view) = handle("B");
        active.set_initial(a.clone());
        a.dispatch(PluginEvent::LoadStarted);
        assert_eq!(a.state(), HandleState::Loading);

        assert_eq!(active.transition(&b), TransitionOutcome::CurrentLoading);
        assert!(active.is_current(&a));
        assert!(!b.is_shown());
        assert!(b_view.calls().is_empty());
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_switch_with_no_current() {
        let host = RecordingHost::new();
        let active = ActivePlugin::new(host.clone(), Duration::from_millis(170));
        let (b, _) = handle("B");

        let outcome = active.transition(&b);
        assert_eq!(
            outcome,
            TransitionOutcome::Switched {
                from: None,
                to: "B".to_string()
            }
        );
        assert!(b.is_shown());
    }

    #[test]
    fn test_fade_ends_immediately_without_runtime() {
        let host = RecordingHost::new();
        let active = ActivePlugin::new(host.clone(), Duration::from_millis(170));
        let (a, _) = handle("A");
        let (b, _) = handle("B");
        active.set_initial(a);

        active.transition(&b);
        assert_eq!(host.fades_started(), 1);
        assert_eq!(host.fades_ended(), 1);
    }

    #[test]
    fn test_set_initial_only_once() {
        let active = ActivePlugin::new(RecordingHost::new(), Duration::from_millis(170));
        let (a, _) = handle("A");
        let (b, _) = handle("B");
        active.set_initial(a.clone());
        active.set_initial(b);
        assert!(active.is_current(&a));
    }
}
