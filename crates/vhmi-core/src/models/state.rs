//! Vehicle state (0x600) model

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Primary drive state (byte 0)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryState {
    #[default]
    Park,
    Drive,
    Reverse,
    Neutral,
    Charge,
    Unknown,
}

impl PrimaryState {
    /// Unmapped codes resolve to `Unknown`, they are never dropped
    pub fn from_code(code: u8) -> Self {
        match code {
            0x01 => PrimaryState::Park,
            0x02 => PrimaryState::Drive,
            0x03 => PrimaryState::Reverse,
            0x04 => PrimaryState::Neutral,
            0x05 => PrimaryState::Charge,
            _ => PrimaryState::Unknown,
        }
    }
}

/// Sub state within the primary state (byte 1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubState {
    Initializing,
    #[default]
    Ready,
    Active,
    Complete,
    Unknown,
}

impl SubState {
    /// Unmapped codes resolve to `Unknown`, same rule as [`PrimaryState`]
    pub fn from_code(code: u8) -> Self {
        match code {
            0x01 => SubState::Initializing,
            0x02 => SubState::Ready,
            0x03 => SubState::Active,
            0x04 => SubState::Complete,
            _ => SubState::Unknown,
        }
    }
}

bitflags::bitflags! {
    /// Status bits carried in byte 2
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u8 {
        const DOOR_OPEN = 0x01;
        const CHARGING_CONNECTED = 0x02;
        const MOTOR_READY = 0x04;
        const BATTERY_OK = 0x08;
        const SYSTEMS_CHECK_PASS = 0x10;
    }
}

impl StatusFlags {
    /// Flag names currently set, in bit order
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

// Serialized as a list of flag names, e.g. ["DOOR_OPEN", "MOTOR_READY"]
impl Serialize for StatusFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names = self.names();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

/// Latest decoded vehicle state frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VehicleState {
    pub primary_state: PrimaryState,
    pub sub_state: SubState,
    pub status_flags: StatusFlags,
    pub fault_present: bool,
    /// Rolling state counter, wraps at 65536
    pub message_counter: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unmapped_codes_are_unknown() {
        assert_eq!(PrimaryState::from_code(0x00), PrimaryState::Unknown);
        assert_eq!(PrimaryState::from_code(0x09), PrimaryState::Unknown);
        assert_eq!(SubState::from_code(0xFF), SubState::Unknown);
    }

    #[test]
    fn test_flags_ignore_undefined_bits() {
        let flags = StatusFlags::from_bits_truncate(0xE5);
        assert_eq!(flags, StatusFlags::DOOR_OPEN | StatusFlags::MOTOR_READY);
    }

    #[test]
    fn test_default_state_json() {
        let value = serde_json::to_value(VehicleState::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "primary_state": "PARK",
                "sub_state": "READY",
                "status_flags": [],
                "fault_present": false,
                "message_counter": 0
            })
        );
    }

    #[test]
    fn test_flags_serialize_in_bit_order() {
        let flags = StatusFlags::SYSTEMS_CHECK_PASS | StatusFlags::CHARGING_CONNECTED;
        assert_eq!(
            serde_json::to_value(flags).unwrap(),
            json!(["CHARGING_CONNECTED", "SYSTEMS_CHECK_PASS"])
        );
    }
}
