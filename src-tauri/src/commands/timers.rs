//! Usage: Countdown timer commands.

use crate::app_state::HostState;
use crate::domain::clock::ClockReading;
use crate::domain::timers::TimerListSnapshot;

#[tauri::command]
pub(crate) fn get_timer_list(state: tauri::State<'_, HostState>) -> TimerListSnapshot {
    state.timer_list()
}

#[tauri::command]
pub(crate) fn push_timer(state: tauri::State<'_, HostState>, seconds: u64) -> ClockReading {
    let timer = state.push_timer(seconds);
    tracing::debug!(timer_id = timer.id, seconds, "timer pushed");
    timer
}

#[tauri::command]
pub(crate) fn get_timer_by_index(
    state: tauri::State<'_, HostState>,
    index: usize,
) -> Result<ClockReading, String> {
    state.timer_by_index(index)
}
