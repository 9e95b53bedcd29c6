//! Usage: App-level settings commands. Written settings take effect on the next launch.

use crate::{blocking, settings};

#[tauri::command]
pub(crate) async fn settings_get(app: tauri::AppHandle) -> Result<settings::AppSettings, String> {
    blocking::run("settings_get", move || settings::read(&app)).await
}

#[tauri::command]
pub(crate) async fn settings_set(
    app: tauri::AppHandle,
    settings: settings::AppSettings,
) -> Result<settings::AppSettings, String> {
    let written = blocking::run("settings_set", move || settings::write(&app, &settings)).await?;
    tracing::info!(
        schema_version = written.schema_version,
        push_interval_ms = written.push_interval_ms,
        "settings saved"
    );
    Ok(written)
}
