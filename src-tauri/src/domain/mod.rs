//! Usage: Host-side domain models (clock, timers, power, auth, push payload).

pub mod auth;
pub mod clock;
pub mod greeting;
pub mod power;
pub mod system_state;
pub mod timers;
