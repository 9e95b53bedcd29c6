//! Usage: Render functions (clock text, power indicator, timer list full render + append).

use super::bridge::HostError;
use super::format::format_clock_timer;
use super::session::ShellSession;
use super::timer_list::ListPatch;
use crate::domain::clock::ClockReading;
use crate::domain::timers::TimerListSnapshot;
use crate::shared::mutex_ext::MutexExt;

impl ShellSession {
    pub async fn render_clock(&self) -> Result<(), HostError> {
        let reading = self
            .host
            .get_clock()
            .await
            .inspect_err(|err| self.record_failure("get_clock", err))?;
        self.record_success("get_clock");

        if let Some(clock) = self.bindings.clock {
            self.document
                .set_text_content(clock.id(), &format_clock_timer(&reading));
        }
        Ok(())
    }

    pub async fn render_power(&self) -> Result<(), HostError> {
        let reading = self
            .host
            .get_power()
            .await
            .inspect_err(|err| self.record_failure("get_power", err))?;
        self.record_success("get_power");

        if let (Some(reading), Some(power)) = (reading, self.bindings.power) {
            self.document
                .set_text_content(power.id(), &reading.power.to_string());
        }
        Ok(())
    }

    pub async fn refresh_timer_list(&self) -> Result<Vec<ListPatch>, HostError> {
        let snapshot = self
            .host
            .get_timer_list()
            .await
            .inspect_err(|err| self.record_failure("get_timer_list", err))?;
        self.record_success("get_timer_list");
        Ok(self.render_timer_list(&snapshot))
    }

    /// Replaces the list with `snapshot`. The first render always writes, later ones only on change.
    pub fn render_timer_list(&self, snapshot: &TimerListSnapshot) -> Vec<ListPatch> {
        let Some(list) = self.bindings.timer_list else {
            return Vec::new();
        };

        let mut view = self.timers.lock_or_recover();
        let first_render = !view.is_synced();
        let patches = view.apply_snapshot(&snapshot.timers);
        if first_render || !patches.is_empty() {
            self.document.set_inner_html(list.id(), &view.markup());
        }
        tracing::debug!(
            timers = view.len(),
            patches = patches.len(),
            "timer list rendered"
        );
        patches
    }

    /// Adds one timer to the rendered list. The model is read and written under one lock.
    pub fn append_timer(&self, timer: &ClockReading) -> Option<ListPatch> {
        let list = self.bindings.timer_list?;

        let mut view = self.timers.lock_or_recover();
        let patch = view.upsert(timer)?;
        self.document.set_inner_html(list.id(), &view.markup());
        Some(patch)
    }
}
