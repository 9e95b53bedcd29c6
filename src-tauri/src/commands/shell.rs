//! Usage: Bridge between the page markup and the host-side shell session of each window.

use crate::shell::{
    ids, LocalHostBridge, ShellEntry, ShellRegistry, ShellSession, WebviewDocument,
};
use std::sync::Arc;

/// Binds a fresh session to the calling window and runs its start hook.
/// A session left over from a previous page load is torn down first.
#[tauri::command]
pub(crate) async fn shell_ready(
    app: tauri::AppHandle,
    window: tauri::WebviewWindow,
    registry: tauri::State<'_, ShellRegistry>,
    ids: Vec<String>,
) -> Result<(), String> {
    let label = window.label().to_string();
    let document = Arc::new(WebviewDocument::new(window, ids));
    let host = Arc::new(LocalHostBridge::new(app, label.clone()));
    let session = Arc::new(ShellSession::new(document.clone(), host));

    let previous = registry.insert(
        &label,
        ShellEntry {
            session: Arc::clone(&session),
            document,
        },
    );
    if let Some(previous) = previous {
        previous.session.teardown();
    }

    session.start().await;
    tracing::info!(window = %label, "shell session started");
    Ok(())
}

/// Records the submitted input value, then runs the matching form handler.
#[tauri::command]
pub(crate) async fn shell_submit(
    window: tauri::WebviewWindow,
    registry: tauri::State<'_, ShellRegistry>,
    form: String,
    value: String,
) -> Result<(), String> {
    let entry = registry
        .get(window.label())
        .ok_or_else(|| format!("SHELL_NOT_READY: window={}", window.label()))?;

    match form.as_str() {
        "greet" => {
            entry.document.set_input_value(ids::GREET_INPUT, &value);
            entry
                .session
                .submit_greeting()
                .await
                .map_err(|e| e.to_string())
        }
        "timer" => {
            entry.document.set_input_value(ids::TIMER_INPUT, &value);
            entry
                .session
                .submit_timer()
                .await
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
        other => Err(format!("SEC_INVALID_INPUT: unknown form={other}")),
    }
}

/// Releases the window's push subscription. The state pump keeps running until the window closes.
#[tauri::command]
pub(crate) fn shell_unload(window: tauri::WebviewWindow, registry: tauri::State<'_, ShellRegistry>) {
    if let Some(entry) = registry.remove(window.label()) {
        if entry.session.teardown() {
            tracing::info!(window = %window.label(), "shell session torn down");
        }
    }
}
