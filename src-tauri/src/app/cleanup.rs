//! Usage: Best-effort cleanup on exit (shell sessions first, then host background tasks).

use super::app_state::HostState;
use crate::shell::ShellRegistry;
use std::sync::atomic::{AtomicBool, Ordering};
use tauri::Manager;

static CLEANUP_STARTED: AtomicBool = AtomicBool::new(false);

pub(crate) fn cleanup_before_exit(app: &tauri::AppHandle) {
    if CLEANUP_STARTED.swap(true, Ordering::SeqCst) {
        return;
    }

    if let Some(registry) = app.try_state::<ShellRegistry>() {
        let mut released = 0usize;
        for (window, entry) in registry.drain() {
            if entry.session.teardown() {
                released += 1;
            }
            tracing::debug!(window = %window, "shell session closed");
        }
        tracing::info!(released, "exit cleanup: shell sessions torn down");
    }

    if let Some(state) = app.try_state::<HostState>() {
        state.stop_background_tasks();
        tracing::info!("exit cleanup: background tasks stopped");
    }
}
