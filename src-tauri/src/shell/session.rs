//! Usage: Shell session (bindings + host bridge + process-scoped state) and its lifecycle hooks.
//!
//! Start: fetch and render the timer list, subscribe to `system_state_update`, then call `setup`.
//! Teardown: release the subscription exactly once. In-flight host calls are not cancelled.

use super::binder::DomBindings;
use super::bridge::{HostBridge, HostError};
use super::document::Document;
use super::payload::SystemStateEvent;
use super::timer_list::TimerListView;
use crate::domain::system_state::SYSTEM_STATE_EVENT;
use crate::shared::mutex_ext::MutexExt;
use std::sync::{Arc, Mutex};
use tauri::async_runtime::JoinHandle;

/// User-visible outcome of the most recent failing host call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShellStatus {
    #[default]
    Ready,
    Failed {
        operation: &'static str,
        message: String,
    },
}

impl ShellStatus {
    pub fn message(&self) -> String {
        match self {
            Self::Ready => String::new(),
            Self::Failed { operation, message } => format!("{operation} failed: {message}"),
        }
    }
}

struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    fn unsubscribe(self) {
        self.task.abort();
    }
}

#[derive(Default)]
struct SessionState {
    last_system_state: Option<SystemStateEvent>,
    subscription: Option<Subscription>,
    status: ShellStatus,
}

pub struct ShellSession {
    pub(super) document: Arc<dyn Document>,
    pub(super) host: Arc<dyn HostBridge>,
    pub(super) bindings: DomBindings,
    pub(super) timers: Mutex<TimerListView>,
    state: Mutex<SessionState>,
}

impl ShellSession {
    /// Binds element handles; call once the document structure is parsed.
    pub fn new(document: Arc<dyn Document>, host: Arc<dyn HostBridge>) -> Self {
        let bindings = DomBindings::resolve(document.as_ref());
        Self {
            document,
            host,
            bindings,
            timers: Mutex::new(TimerListView::default()),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn bindings(&self) -> &DomBindings {
        &self.bindings
    }

    pub async fn start(self: &Arc<Self>) {
        // Failures are surfaced on the status element; the remaining steps still run.
        let _ = self.refresh_timer_list().await;

        if let Err(err) = self.subscribe().await {
            self.record_failure("listen", &err);
        }

        match self.host.setup().await {
            Ok(()) => self.record_success("setup"),
            Err(err) => self.record_failure("setup", &err),
        }
    }

    /// Returns whether a subscription was released.
    pub fn teardown(&self) -> bool {
        let subscription = self.state.lock_or_recover().subscription.take();
        match subscription {
            Some(subscription) => {
                subscription.unsubscribe();
                tracing::debug!("shell unsubscribed from {}", SYSTEM_STATE_EVENT);
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.lock_or_recover().subscription.is_some()
    }

    pub fn last_system_state(&self) -> Option<SystemStateEvent> {
        self.state.lock_or_recover().last_system_state.clone()
    }

    pub fn status(&self) -> ShellStatus {
        self.state.lock_or_recover().status.clone()
    }

    async fn subscribe(self: &Arc<Self>) -> Result<(), HostError> {
        let mut events = self.host.listen(SYSTEM_STATE_EVENT).await?;
        // Weak: the subscription must not keep a torn-down session alive.
        let weak = Arc::downgrade(self);
        let task = tauri::async_runtime::spawn(async move {
            while let Some(raw) = events.recv().await {
                let Some(session) = weak.upgrade() else {
                    break;
                };
                session.handle_push(raw).await;
            }
        });

        let previous = self
            .state
            .lock_or_recover()
            .subscription
            .replace(Subscription { task });
        if let Some(previous) = previous {
            tracing::warn!("shell subscribed twice; releasing the older subscription");
            previous.unsubscribe();
        }
        Ok(())
    }

    /// Stores the payload as the last system state, then re-renders power and clock.
    pub async fn handle_push(&self, raw: serde_json::Value) {
        let event = SystemStateEvent::from_value(raw);
        if let SystemStateEvent::Unrecognized(raw) = &event {
            tracing::warn!(payload = %raw, "unrecognized {} payload", SYSTEM_STATE_EVENT);
        }
        self.state.lock_or_recover().last_system_state = Some(event);

        let _ = self.render_power().await;
        let _ = self.render_clock().await;
    }

    pub(super) fn record_failure(&self, operation: &'static str, err: &HostError) {
        tracing::warn!(operation, error = %err, "host call failed");
        let status = ShellStatus::Failed {
            operation,
            message: err.to_string(),
        };
        self.state.lock_or_recover().status = status.clone();
        self.render_status(&status);
    }

    /// Clears a failure previously recorded for the same operation.
    pub(super) fn record_success(&self, operation: &'static str) {
        let cleared = {
            let mut state = self.state.lock_or_recover();
            let failed_here = matches!(
                &state.status,
                ShellStatus::Failed { operation: failed, .. } if *failed == operation
            );
            if failed_here {
                state.status = ShellStatus::Ready;
            }
            failed_here
        };
        if cleared {
            self.render_status(&ShellStatus::Ready);
        }
    }

    fn render_status(&self, status: &ShellStatus) {
        if let Some(handle) = self.bindings.status {
            self.document
                .set_text_content(handle.id(), &status.message());
        }
    }
}
