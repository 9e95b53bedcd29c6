//! Usage: Window lifecycle hooks (release per-window shell session and state pump on destroy).

use super::app_state::HostState;
use crate::shell::ShellRegistry;
use tauri::Manager;

pub(crate) fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if !matches!(event, tauri::WindowEvent::Destroyed) {
        return;
    }

    let label = window.label();
    let app = window.app_handle();

    if let Some(registry) = app.try_state::<ShellRegistry>() {
        if let Some(entry) = registry.remove(label) {
            entry.session.teardown();
        }
    }

    if let Some(state) = app.try_state::<HostState>() {
        if state.stop_state_pump(label) {
            tracing::info!(window = %label, "system state pump stopped");
        }
    }
}
