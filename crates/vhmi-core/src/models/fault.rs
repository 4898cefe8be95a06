//! Fault status (0x601) model

use serde::Serialize;

/// Subsystem reporting the fault (byte 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultSource {
    Battery,
    Motor,
    Charging,
    Tire,
    Power,
}

impl FaultSource {
    /// Unmapped codes yield `None` rather than an `Unknown` variant
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(FaultSource::Battery),
            0x02 => Some(FaultSource::Motor),
            0x03 => Some(FaultSource::Charging),
            0x04 => Some(FaultSource::Tire),
            0x05 => Some(FaultSource::Power),
            _ => None,
        }
    }
}

/// Kind of fault (byte 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultType {
    TempHigh,
    TempLow,
    PressureHigh,
    PressureLow,
    CurrentHigh,
    VoltageHigh,
    VoltageLow,
    CommError,
}

impl FaultType {
    /// Unmapped codes yield `None`, same rule as [`FaultSource`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(FaultType::TempHigh),
            0x02 => Some(FaultType::TempLow),
            0x03 => Some(FaultType::PressureHigh),
            0x04 => Some(FaultType::PressureLow),
            0x05 => Some(FaultType::CurrentHigh),
            0x06 => Some(FaultType::VoltageHigh),
            0x07 => Some(FaultType::VoltageLow),
            0x08 => Some(FaultType::CommError),
            _ => None,
        }
    }
}

/// Latest decoded fault status frame
///
/// `active` is derived from `severity` and can only be set through
/// [`FaultStatus::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FaultStatus {
    pub source: Option<FaultSource>,
    #[serde(rename = "type")]
    pub fault_type: Option<FaultType>,
    pub severity: u8,
    /// Device-relative timestamp
    pub timestamp: u32,
    pub counter: u8,
    active: bool,
}

impl FaultStatus {
    pub fn new(
        source: Option<FaultSource>,
        fault_type: Option<FaultType>,
        severity: u8,
        timestamp: u32,
        counter: u8,
    ) -> Self {
        Self {
            source,
            fault_type,
            severity,
            timestamp,
            counter,
            active: severity > 0,
        }
    }

    pub fn active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_active_follows_severity() {
        assert!(!FaultStatus::new(None, None, 0, 0, 0).active());
        for severity in 1..=u8::MAX {
            assert!(FaultStatus::new(None, None, severity, 0, 0).active());
        }
    }

    #[test]
    fn test_unmapped_codes_are_absent() {
        assert_eq!(FaultSource::from_code(0x00), None);
        assert_eq!(FaultSource::from_code(0x06), None);
        assert_eq!(FaultType::from_code(0x09), None);
    }

    #[test]
    fn test_json_uses_type_key() {
        let fault = FaultStatus::new(
            Some(FaultSource::Tire),
            Some(FaultType::PressureLow),
            2,
            1000,
            9,
        );
        assert_eq!(
            serde_json::to_value(fault).unwrap(),
            json!({
                "source": "TIRE",
                "type": "PRESSURE_LOW",
                "severity": 2,
                "timestamp": 1000,
                "counter": 9,
                "active": true
            })
        );
    }
}
