//! Usage: Host lifecycle, greeting, clock and power commands.

use crate::app_state::HostState;
use crate::background;
use crate::domain::clock::ClockReading;
use crate::domain::greeting;
use crate::domain::power::PowerReading;

/// Starts the `system_state_update` pump for the calling window. Repeated calls are no-ops.
#[tauri::command]
pub(crate) fn setup(app: tauri::AppHandle, window: tauri::WebviewWindow) {
    background::ensure_state_pump(&app, window.label());
}

#[tauri::command]
pub(crate) fn greet(name: &str) -> String {
    greeting::greet(name)
}

#[tauri::command]
pub(crate) fn get_clock(state: tauri::State<'_, HostState>) -> ClockReading {
    state.clock()
}

#[tauri::command]
pub(crate) fn get_power(state: tauri::State<'_, HostState>) -> PowerReading {
    state.power()
}

#[tauri::command]
pub(crate) fn reset_power(state: tauri::State<'_, HostState>) -> PowerReading {
    let reading = state.reset_power();
    tracing::info!(power = reading.power, "power reset");
    reading
}
