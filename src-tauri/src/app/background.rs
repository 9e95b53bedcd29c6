//! Usage: Host background tasks (power sampler, per-window `system_state_update` pump).

use super::app_state::HostState;
use crate::domain::power::PowerState;
use crate::domain::system_state::{SystemStatePayload, SYSTEM_STATE_EVENT};
use crate::shared::mutex_ext::MutexExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tauri::async_runtime::JoinHandle;
use tauri::{Emitter, Manager};
use tokio::time::MissedTickBehavior;

pub(crate) fn spawn_power_sampler(
    power: Arc<Mutex<PowerState>>,
    interval: Duration,
) -> JoinHandle<()> {
    tauri::async_runtime::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the initial level is kept for one interval.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let level = power.lock_or_recover().sample(&mut rng);
            tracing::trace!(power = level, "power sampled");
        }
    })
}

/// Emits the current system state once per `interval` until the task is aborted.
pub(crate) async fn run_state_pump<S, E>(interval: Duration, mut source: S, mut sink: E)
where
    S: FnMut() -> SystemStatePayload,
    E: FnMut(SystemStatePayload) -> Result<(), String>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut failing = false;
    loop {
        ticker.tick().await;
        match sink(source()) {
            Ok(()) => failing = false,
            Err(err) => {
                if !failing {
                    tracing::warn!("system state emit failed: {}", err);
                }
                failing = true;
            }
        }
    }
}

/// Starts the pump for `window` unless one already runs. Returns whether a pump was started.
pub(crate) fn ensure_state_pump(app: &tauri::AppHandle, window: &str) -> bool {
    let state = app.state::<HostState>();
    let interval = Duration::from_millis(state.settings().push_interval_ms);

    let started = state.start_state_pump_if_absent(window, || {
        let app = app.clone();
        let label = window.to_string();
        tauri::async_runtime::spawn(async move {
            run_state_pump(
                interval,
                || app.state::<HostState>().system_state(),
                |payload| {
                    let value = serde_json::to_value(payload)
                        .map_err(|e| format!("EVENT_ENCODE: {e}"))?;
                    app.state::<HostState>()
                        .publish(&label, SYSTEM_STATE_EVENT, value);
                    app.emit_to(label.as_str(), SYSTEM_STATE_EVENT, payload)
                        .map_err(|e| format!("EVENT_EMIT: {e}"))
                },
            )
            .await
        })
    });

    if started {
        tracing::info!(window = %window, interval_ms = interval.as_millis() as u64, "system state pump started");
    }
    started
}
