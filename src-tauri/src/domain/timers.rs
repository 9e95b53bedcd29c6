//! Usage: Countdown timer book (ordered timers, id assignment, remaining-time snapshots).

use super::clock::ClockReading;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerListSnapshot {
    pub timers: Vec<ClockReading>,
}

#[derive(Debug, Clone)]
struct CountdownTimer {
    id: u64,
    duration: Duration,
    started_at: Instant,
}

impl CountdownTimer {
    fn remaining_at(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.started_at);
        self.duration.saturating_sub(elapsed)
    }

    fn reading_at(&self, now: Instant) -> ClockReading {
        ClockReading::from_duration(self.remaining_at(now)).with_id(self.id)
    }
}

#[derive(Debug, Default)]
pub struct TimerBook {
    timers: Vec<CountdownTimer>,
}

impl TimerBook {
    /// Ids are `len + 1`; timers are never removed, so ids stay unique.
    pub fn push(&mut self, seconds: u64, now: Instant) -> ClockReading {
        let timer = CountdownTimer {
            id: self.timers.len() as u64 + 1,
            duration: Duration::from_secs(seconds),
            started_at: now,
        };
        let reading = timer.reading_at(now);
        self.timers.push(timer);
        reading
    }

    pub fn snapshot_at(&self, now: Instant) -> TimerListSnapshot {
        TimerListSnapshot {
            timers: self.timers.iter().map(|t| t.reading_at(now)).collect(),
        }
    }

    pub fn get_at(&self, index: usize, now: Instant) -> Option<ClockReading> {
        self.timers.get(index).map(|t| t.reading_at(now))
    }
}
