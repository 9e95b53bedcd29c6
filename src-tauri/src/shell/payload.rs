//! Usage: Boundary validation of the opaque `system_state_update` payload.

use crate::domain::system_state::{SystemStatePayload, SYSTEM_STATE_VERSION};

/// Last-seen system state. Unknown shapes are kept as-is so newer hosts keep working.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStateEvent {
    V1(SystemStatePayload),
    Unrecognized(serde_json::Value),
}

impl SystemStateEvent {
    pub fn from_value(raw: serde_json::Value) -> Self {
        match serde_json::from_value::<SystemStatePayload>(raw.clone()) {
            Ok(payload) if payload.version == SYSTEM_STATE_VERSION => Self::V1(payload),
            _ => Self::Unrecognized(raw),
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::V1(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn v1_payload_is_recognized() {
        let event = SystemStateEvent::from_value(json!({ "version": 1, "power": 73 }));
        assert_eq!(event, SystemStateEvent::V1(SystemStatePayload::new(73)));
        assert!(event.is_recognized());
    }

    #[test]
    fn unknown_version_is_kept_raw() {
        let raw = json!({ "version": 2, "power": 73, "battery": "ok" });
        let event = SystemStateEvent::from_value(raw.clone());
        assert_eq!(event, SystemStateEvent::Unrecognized(raw));
    }

    #[test]
    fn unversioned_legacy_shape_is_unrecognized() {
        let event = SystemStateEvent::from_value(json!({ "power": 100 }));
        assert!(!event.is_recognized());
        let event = SystemStateEvent::from_value(json!(null));
        assert!(!event.is_recognized());
    }
}
