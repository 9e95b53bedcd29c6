//! Usage: Tauri adapters for the shell: a webview-backed document and an in-process host bridge.
//!
//! - `WebviewDocument` keeps a mirror of element state and replays each write into the page
//!   with `WebviewWindow::eval`.
//! - `LocalHostBridge` serves the RPC surface from `HostState` directly and feeds the push
//!   channel from the state pump's in-process fan-out.

use super::bridge::{EventStream, HostBridge, HostError};
use super::document::{Document, DocumentMirror};
use crate::app_state::{HostState, PushedEvent};
use crate::background;
use crate::domain::clock::ClockReading;
use crate::domain::greeting;
use crate::domain::power::PowerReading;
use crate::domain::system_state::SYSTEM_STATE_EVENT;
use crate::domain::timers::TimerListSnapshot;
use async_trait::async_trait;
use tauri::Manager;
use tokio::sync::{broadcast, mpsc};

fn assign_script(id: &str, property: &str, value: &str) -> String {
    let id = serde_json::Value::from(id);
    let value = serde_json::Value::from(value);
    format!(
        "(function(){{var el=document.getElementById({id});if(el){{el.{property}={value};}}}})();"
    )
}

pub(crate) struct WebviewDocument {
    mirror: DocumentMirror,
    window: tauri::WebviewWindow,
}

impl WebviewDocument {
    /// `ids` are the element ids present in the page when it reported ready.
    pub(crate) fn new(window: tauri::WebviewWindow, ids: Vec<String>) -> Self {
        Self {
            mirror: DocumentMirror::with_elements(ids),
            window,
        }
    }

    pub(crate) fn set_input_value(&self, id: &str, value: &str) -> bool {
        self.mirror.set_input_value(id, value)
    }

    fn write(&self, id: &str, property: &str, value: &str) {
        if !self.mirror.write_content(id, value) {
            return;
        }
        if let Err(err) = self.window.eval(&assign_script(id, property, value)) {
            tracing::warn!(
                window = %self.window.label(),
                element = %id,
                "webview eval failed: {}",
                err
            );
        }
    }
}

impl Document for WebviewDocument {
    fn contains(&self, id: &str) -> bool {
        self.mirror.contains(id)
    }

    fn text_content(&self, id: &str) -> Option<String> {
        self.mirror.text_content(id)
    }

    fn set_text_content(&self, id: &str, text: &str) {
        self.write(id, "textContent", text);
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.mirror.inner_html(id)
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        self.write(id, "innerHTML", html);
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.mirror.input_value(id)
    }
}

pub(crate) struct LocalHostBridge {
    app: tauri::AppHandle,
    window: String,
}

impl LocalHostBridge {
    pub(crate) fn new(app: tauri::AppHandle, window: String) -> Self {
        Self { app, window }
    }

    fn state(&self) -> Result<tauri::State<'_, HostState>, HostError> {
        self.app
            .try_state::<HostState>()
            .ok_or_else(|| HostError::Unavailable("host state not initialized".to_string()))
    }
}

fn push_timer_seconds(seconds: Option<i64>) -> Result<u64, HostError> {
    let invalid = |message: String| HostError::InvalidArgument {
        command: "push_timer",
        message,
    };
    let seconds = seconds.ok_or_else(|| invalid("seconds: expected an integer, got null".to_string()))?;
    u64::try_from(seconds)
        .map_err(|_| invalid(format!("seconds: expected a non-negative integer, got {seconds}")))
}

/// Relays `window`'s `system_state_update` payloads until either side goes away.
async fn forward_pushes(
    mut pushes: broadcast::Receiver<PushedEvent>,
    tx: mpsc::UnboundedSender<serde_json::Value>,
    window: String,
) {
    loop {
        tokio::select! {
            _ = tx.closed() => break,
            received = pushes.recv() => match received {
                Ok(event) => {
                    if event.window != window || event.topic != SYSTEM_STATE_EVENT {
                        continue;
                    }
                    if tx.send(event.payload).is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(window = %window, skipped, "push listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}

#[async_trait]
impl HostBridge for LocalHostBridge {
    async fn setup(&self) -> Result<(), HostError> {
        self.state()?;
        background::ensure_state_pump(&self.app, &self.window);
        Ok(())
    }

    async fn greet(&self, name: &str) -> Result<String, HostError> {
        Ok(greeting::greet(name))
    }

    async fn get_clock(&self) -> Result<ClockReading, HostError> {
        Ok(self.state()?.clock())
    }

    async fn get_power(&self) -> Result<Option<PowerReading>, HostError> {
        Ok(Some(self.state()?.power()))
    }

    async fn get_timer_list(&self) -> Result<TimerListSnapshot, HostError> {
        Ok(self.state()?.timer_list())
    }

    async fn push_timer(&self, seconds: Option<i64>) -> Result<ClockReading, HostError> {
        let seconds = push_timer_seconds(seconds)?;
        Ok(self.state()?.push_timer(seconds))
    }

    async fn listen(&self, topic: &str) -> Result<EventStream, HostError> {
        if topic != SYSTEM_STATE_EVENT {
            return Err(HostError::Rejected {
                command: "listen",
                message: format!("unknown topic={topic}"),
            });
        }

        let pushes = self.state()?.subscribe_pushes();
        let (tx, rx) = mpsc::unbounded_channel();
        tauri::async_runtime::spawn(forward_pushes(pushes, tx, self.window.clone()));
        Ok(rx)
    }
}
