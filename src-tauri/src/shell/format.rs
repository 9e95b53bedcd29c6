//! Usage: Fixed-width `HH:MM:SS:mmm` rendering of clock and timer readings.

use crate::domain::clock::ClockReading;

fn pad2(value: u64) -> String {
    if value < 10 {
        format!("0{value}")
    } else {
        value.to_string()
    }
}

fn pad3(value: u64) -> String {
    if value < 10 {
        format!("00{value}")
    } else if value < 100 {
        format!("0{value}")
    } else {
        value.to_string()
    }
}

/// Pads each field independently; values wider than their slot are never truncated.
pub fn format_clock_timer(reading: &ClockReading) -> String {
    format!(
        "{}:{}:{}:{}",
        pad2(reading.hours),
        pad2(u64::from(reading.minutes)),
        pad2(u64::from(reading.seconds)),
        pad3(u64::from(reading.milliseconds))
    )
}
