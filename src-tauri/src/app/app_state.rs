//! Usage: Tauri-managed host state shared by `commands/*`, background tasks and the shell bridge.

use crate::domain::auth::AuthState;
use crate::domain::clock::{ClockReading, HostClock};
use crate::domain::power::{PowerReading, PowerState};
use crate::domain::system_state::SystemStatePayload;
use crate::domain::timers::{TimerBook, TimerListSnapshot};
use crate::settings::AppSettings;
use crate::shared::mutex_ext::MutexExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tauri::async_runtime::JoinHandle;
use tokio::sync::broadcast;

const PUSH_CHANNEL_CAPACITY: usize = 64;

/// A push event as fanned out to in-process listeners.
#[derive(Debug, Clone)]
pub(crate) struct PushedEvent {
    pub(crate) window: String,
    pub(crate) topic: &'static str,
    pub(crate) payload: serde_json::Value,
}

#[derive(Default)]
struct BackgroundTasks {
    power_sampler: Option<JoinHandle<()>>,
    state_pumps: HashMap<String, JoinHandle<()>>,
}

pub(crate) struct HostState {
    settings: AppSettings,
    clock: HostClock,
    power: Arc<Mutex<PowerState>>,
    timers: Mutex<TimerBook>,
    auth: Mutex<AuthState>,
    pushes: broadcast::Sender<PushedEvent>,
    tasks: Mutex<BackgroundTasks>,
}

impl HostState {
    pub(crate) fn new(settings: &AppSettings) -> Self {
        let (pushes, _) = broadcast::channel(PUSH_CHANNEL_CAPACITY);
        Self {
            settings: settings.clone(),
            clock: HostClock::new(settings.clock_mode),
            power: Arc::new(Mutex::new(PowerState::new(settings.initial_power))),
            timers: Mutex::new(TimerBook::default()),
            auth: Mutex::new(AuthState::default()),
            pushes,
            tasks: Mutex::new(BackgroundTasks::default()),
        }
    }

    pub(crate) fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub(crate) fn clock(&self) -> ClockReading {
        self.clock.now()
    }

    pub(crate) fn power(&self) -> PowerReading {
        self.power.lock_or_recover().reading()
    }

    pub(crate) fn power_handle(&self) -> Arc<Mutex<PowerState>> {
        Arc::clone(&self.power)
    }

    pub(crate) fn reset_power(&self) -> PowerReading {
        self.power.lock_or_recover().reset()
    }

    pub(crate) fn system_state(&self) -> SystemStatePayload {
        SystemStatePayload::new(self.power().power)
    }

    pub(crate) fn push_timer(&self, seconds: u64) -> ClockReading {
        self.timers.lock_or_recover().push(seconds, Instant::now())
    }

    pub(crate) fn timer_list(&self) -> TimerListSnapshot {
        self.timers.lock_or_recover().snapshot_at(Instant::now())
    }

    pub(crate) fn timer_by_index(&self, index: usize) -> Result<ClockReading, String> {
        self.timers
            .lock_or_recover()
            .get_at(index, Instant::now())
            .ok_or_else(|| format!("TIMER_NOT_FOUND: no timer at index={index}"))
    }

    pub(crate) fn auth(&self) -> AuthState {
        *self.auth.lock_or_recover()
    }

    pub(crate) fn login(&self) -> AuthState {
        self.auth.lock_or_recover().login()
    }

    pub(crate) fn logout(&self) -> AuthState {
        self.auth.lock_or_recover().logout()
    }

    pub(crate) fn subscribe_pushes(&self) -> broadcast::Receiver<PushedEvent> {
        self.pushes.subscribe()
    }

    /// Fans an event out to in-process listeners. Having none is not an error.
    pub(crate) fn publish(&self, window: &str, topic: &'static str, payload: serde_json::Value) {
        let _ = self.pushes.send(PushedEvent {
            window: window.to_string(),
            topic,
            payload,
        });
    }

    pub(crate) fn set_power_sampler(&self, task: JoinHandle<()>) {
        let previous = self.tasks.lock_or_recover().power_sampler.replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Returns `false` when a pump already runs for `window`; `spawn` is not called then.
    pub(crate) fn start_state_pump_if_absent(
        &self,
        window: &str,
        spawn: impl FnOnce() -> JoinHandle<()>,
    ) -> bool {
        let mut tasks = self.tasks.lock_or_recover();
        if tasks.state_pumps.contains_key(window) {
            return false;
        }
        tasks.state_pumps.insert(window.to_string(), spawn());
        true
    }

    pub(crate) fn stop_state_pump(&self, window: &str) -> bool {
        let task = self.tasks.lock_or_recover().state_pumps.remove(window);
        match task {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    pub(crate) fn stop_background_tasks(&self) {
        let (sampler, pumps) = {
            let mut tasks = self.tasks.lock_or_recover();
            (
                tasks.power_sampler.take(),
                std::mem::take(&mut tasks.state_pumps),
            )
        };
        if let Some(sampler) = sampler {
            sampler.abort();
        }
        for (window, pump) in pumps {
            tracing::debug!(window = %window, "stopping system state pump");
            pump.abort();
        }
    }
}
