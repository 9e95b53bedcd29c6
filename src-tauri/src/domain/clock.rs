//! Usage: Clock readings (duration split into display digits) and the host's "now" source.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// A duration split into display digits. `id` is only meaningful for timer entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockReading {
    pub hours: u64,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
    pub id: u64,
}

impl ClockReading {
    pub fn from_duration(duration: Duration) -> Self {
        let total_secs = duration.as_secs();
        Self {
            hours: total_secs / 3600,
            minutes: ((total_secs / 60) % 60) as u32,
            seconds: (total_secs % 60) as u32,
            milliseconds: duration.subsec_millis(),
            id: 0,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    /// Time of day in UTC.
    #[default]
    WallUtc,
    /// Time elapsed since the host started.
    Uptime,
}

#[derive(Debug, Clone)]
pub struct HostClock {
    mode: ClockMode,
    started: Instant,
}

impl HostClock {
    pub fn new(mode: ClockMode) -> Self {
        Self {
            mode,
            started: Instant::now(),
        }
    }

    pub fn now(&self) -> ClockReading {
        match self.mode {
            ClockMode::WallUtc => {
                let since_epoch = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default();
                ClockReading::from_duration(time_of_day(since_epoch))
            }
            ClockMode::Uptime => ClockReading::from_duration(self.started.elapsed()),
        }
    }
}

fn time_of_day(since_epoch: Duration) -> Duration {
    let secs = since_epoch.as_secs() % SECONDS_PER_DAY;
    Duration::new(secs, since_epoch.subsec_nanos())
}
