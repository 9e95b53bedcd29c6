//! Usage: `system_state_update` push event (name + versioned payload shared by host and shell).

use serde::{Deserialize, Serialize};

pub const SYSTEM_STATE_EVENT: &str = "system_state_update";
pub const SYSTEM_STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatePayload {
    pub version: u32,
    pub power: i32,
}

impl SystemStatePayload {
    pub fn new(power: i32) -> Self {
        Self {
            version: SYSTEM_STATE_VERSION,
            power,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_current_version() {
        let json = serde_json::to_value(SystemStatePayload::new(64)).expect("serialize");
        assert_eq!(json, serde_json::json!({ "version": 1, "power": 64 }));
    }
}
