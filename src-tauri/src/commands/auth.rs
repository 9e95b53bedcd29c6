//! Usage: Logged-in flag commands.

use crate::app_state::HostState;
use crate::domain::auth::AuthState;

#[tauri::command]
pub(crate) fn login(state: tauri::State<'_, HostState>) -> AuthState {
    state.login()
}

#[tauri::command]
pub(crate) fn logout(state: tauri::State<'_, HostState>) -> AuthState {
    state.logout()
}

#[tauri::command]
pub(crate) fn get_login(state: tauri::State<'_, HostState>) -> AuthState {
    state.auth()
}
