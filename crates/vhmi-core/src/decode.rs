//! Decoding frame payloads into typed fields
//!
//! Layouts are fixed per identifier. All multi-byte fields are big-endian
//! and every value is stored as the raw byte(s) from the bus.

use crate::error::{DecodeError, DecodeResult};
use crate::frame::Signal;
use crate::models::{
    FaultSource, FaultStatus, FaultType, PrimaryState, StatusFlags, SubState, VehicleData,
    VehicleState,
};

/// Decode a vehicle state frame (0x600)
///
/// | byte | field |
/// |------|-------|
/// | 0    | primary state code |
/// | 1    | sub state code |
/// | 2    | status flag bitmask |
/// | 3    | fault present (non-zero = true) |
/// | 4-5  | message counter, big-endian |
pub fn decode_vehicle_state(data: &[u8]) -> DecodeResult<VehicleState> {
    let data = require(Signal::VehicleState, data)?;

    Ok(VehicleState {
        primary_state: PrimaryState::from_code(data[0]),
        sub_state: SubState::from_code(data[1]),
        status_flags: StatusFlags::from_bits_truncate(data[2]),
        fault_present: data[3] != 0,
        message_counter: u16::from_be_bytes([data[4], data[5]]),
    })
}

/// Decode a fault status frame (0x601)
///
/// | byte | field |
/// |------|-------|
/// | 0    | fault source code |
/// | 1    | fault type code |
/// | 2    | severity |
/// | 3-6  | device timestamp, big-endian |
/// | 7    | fault counter |
pub fn decode_fault_status(data: &[u8]) -> DecodeResult<FaultStatus> {
    let data = require(Signal::FaultStatus, data)?;

    Ok(FaultStatus::new(
        FaultSource::from_code(data[0]),
        FaultType::from_code(data[1]),
        data[2],
        u32::from_be_bytes([data[3], data[4], data[5], data[6]]),
        data[7],
    ))
}

/// A single metric write, tagged by the field it targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUpdate {
    ChargePercent(u8),
    ChargingRate(u8),
    FullChargeTime(u8),
    BatteryTemp(u8),
    MotorTemp(u8),
    InverterTemp(u8),
    BrakeTemp(u8),
    PowerOutput(u8),
    TireTemp([u8; 4]),
    TirePressure([u8; 4]),
    TorqueDistribution([u8; 4]),
    SuspensionMetrics([u8; 4]),
    GForces([u8; 3]),
}

impl MetricUpdate {
    /// Write the value into its field, replacing the previous value
    pub fn apply(self, data: &mut VehicleData) {
        match self {
            MetricUpdate::ChargePercent(v) => data.charge_percent = v,
            MetricUpdate::ChargingRate(v) => data.charging_rate = v,
            MetricUpdate::FullChargeTime(v) => data.full_charge_time = v,
            MetricUpdate::BatteryTemp(v) => data.battery_temp = v,
            MetricUpdate::MotorTemp(v) => data.motor_temp = v,
            MetricUpdate::InverterTemp(v) => data.inverter_temp = v,
            MetricUpdate::BrakeTemp(v) => data.brake_temp = v,
            MetricUpdate::PowerOutput(v) => data.power_output = v,
            MetricUpdate::TireTemp(v) => data.tire_temp = v,
            MetricUpdate::TirePressure(v) => data.tire_pressure = v,
            MetricUpdate::TorqueDistribution(v) => data.torque_distribution = v,
            MetricUpdate::SuspensionMetrics(v) => data.suspension_metrics = v,
            MetricUpdate::GForces(v) => data.g_forces = v,
        }
    }
}

/// Decode a scalar or array metric frame
pub fn decode_metric(signal: Signal, data: &[u8]) -> DecodeResult<MetricUpdate> {
    let data = require(signal, data)?;

    let update = match signal {
        Signal::ChargePercentage => MetricUpdate::ChargePercent(data[0]),
        Signal::ChargingRate => MetricUpdate::ChargingRate(data[0]),
        Signal::EstimatedFullChargeTime => MetricUpdate::FullChargeTime(data[0]),
        Signal::BatteryTemp => MetricUpdate::BatteryTemp(data[0]),
        Signal::MotorTemp => MetricUpdate::MotorTemp(data[0]),
        Signal::InverterTemp => MetricUpdate::InverterTemp(data[0]),
        Signal::BrakeTemp => MetricUpdate::BrakeTemp(data[0]),
        Signal::PowerOutput => MetricUpdate::PowerOutput(data[0]),
        Signal::TireTemp => MetricUpdate::TireTemp(quad(data)),
        Signal::TirePressure => MetricUpdate::TirePressure(quad(data)),
        Signal::TorqueDistribution => MetricUpdate::TorqueDistribution(quad(data)),
        Signal::SuspensionMetrics => MetricUpdate::SuspensionMetrics(quad(data)),
        Signal::GForces => MetricUpdate::GForces([data[0], data[1], data[2]]),
        Signal::VehicleState | Signal::FaultStatus => return Err(DecodeError::NotAMetric(signal)),
    };

    Ok(update)
}

/// Check the payload covers the signal's layout; trailing bytes are ignored
fn require(signal: Signal, data: &[u8]) -> DecodeResult<&[u8]> {
    let expected = signal.min_payload();
    if data.len() < expected {
        return Err(DecodeError::PayloadTooShort {
            signal,
            expected,
            actual: data.len(),
        });
    }
    Ok(&data[..expected])
}

fn quad(data: &[u8]) -> [u8; 4] {
    [data[0], data[1], data[2], data[3]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_vehicle_state_drive_active() {
        let state = decode_vehicle_state(&[0x02, 0x03, 0x05, 0x00, 0x00, 0x01]).unwrap();

        assert_eq!(
            state,
            VehicleState {
                primary_state: PrimaryState::Drive,
                sub_state: SubState::Active,
                status_flags: StatusFlags::DOOR_OPEN | StatusFlags::MOTOR_READY,
                fault_present: false,
                message_counter: 1,
            }
        );
        assert_eq!(state.status_flags.names(), vec!["DOOR_OPEN", "MOTOR_READY"]);
    }

    #[test]
    fn test_decode_vehicle_state_is_deterministic() {
        let payload = [0x05, 0x04, 0x1F, 0x01, 0xAB, 0xCD];
        let first = decode_vehicle_state(&payload).unwrap();
        let second = decode_vehicle_state(&payload).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.message_counter, 0xABCD);
        assert!(first.fault_present);
        assert_eq!(first.status_flags, StatusFlags::all());
    }

    #[test]
    fn test_decode_vehicle_state_unknown_codes() {
        let state = decode_vehicle_state(&[0x09, 0x00, 0x00, 0x00, 0x00, 0x02]).unwrap();
        assert_eq!(state.primary_state, PrimaryState::Unknown);
        assert_eq!(state.sub_state, SubState::Unknown);
        assert!(state.status_flags.is_empty());
    }

    #[test]
    fn test_decode_vehicle_state_any_nonzero_fault_byte() {
        let state = decode_vehicle_state(&[0x01, 0x01, 0x00, 0x80, 0x00, 0x00]).unwrap();
        assert!(state.fault_present);
    }

    #[test]
    fn test_decode_vehicle_state_short_payload() {
        let err = decode_vehicle_state(&[0x02, 0x03, 0x05]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::PayloadTooShort {
                signal: Signal::VehicleState,
                expected: 6,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_decode_fault_status_motor_current_high() {
        let fault =
            decode_fault_status(&[0x02, 0x05, 0x03, 0x00, 0x00, 0x00, 0x2A, 0x07]).unwrap();

        assert_eq!(fault.source, Some(FaultSource::Motor));
        assert_eq!(fault.fault_type, Some(FaultType::CurrentHigh));
        assert_eq!(fault.severity, 3);
        assert_eq!(fault.timestamp, 42);
        assert_eq!(fault.counter, 7);
        assert!(fault.active());
    }

    #[test]
    fn test_decode_fault_status_unmapped_codes_absent() {
        let fault =
            decode_fault_status(&[0x0F, 0x00, 0x00, 0x12, 0x34, 0x56, 0x78, 0x00]).unwrap();

        assert_eq!(fault.source, None);
        assert_eq!(fault.fault_type, None);
        assert_eq!(fault.timestamp, 0x1234_5678);
        assert!(!fault.active());
    }

    #[test]
    fn test_decode_fault_status_short_payload() {
        assert!(matches!(
            decode_fault_status(&[0x01; 7]),
            Err(DecodeError::PayloadTooShort { expected: 8, actual: 7, .. })
        ));
    }

    #[test]
    fn test_decode_tire_temp_replaces_array() {
        let mut data = VehicleData::default();
        data.tire_temp = [1, 2, 3, 4];
        data.motor_temp = 88;

        decode_metric(Signal::TireTemp, &[30, 31, 29, 32, 0xFF, 0xFF])
            .unwrap()
            .apply(&mut data);

        assert_eq!(data.tire_temp, [30, 31, 29, 32]);
        assert_eq!(data.motor_temp, 88);
        assert_eq!(data.tire_pressure, [0; 4]);
    }

    #[test]
    fn test_decode_scalar_metrics_verbatim() {
        let cases = [
            (Signal::ChargePercentage, MetricUpdate::ChargePercent(200)),
            (Signal::ChargingRate, MetricUpdate::ChargingRate(200)),
            (Signal::EstimatedFullChargeTime, MetricUpdate::FullChargeTime(200)),
            (Signal::BatteryTemp, MetricUpdate::BatteryTemp(200)),
            (Signal::MotorTemp, MetricUpdate::MotorTemp(200)),
            (Signal::InverterTemp, MetricUpdate::InverterTemp(200)),
            (Signal::BrakeTemp, MetricUpdate::BrakeTemp(200)),
            (Signal::PowerOutput, MetricUpdate::PowerOutput(200)),
        ];
        for (signal, expected) in cases {
            assert_eq!(decode_metric(signal, &[200, 1, 2]).unwrap(), expected);
        }
    }

    #[test]
    fn test_decode_g_forces() {
        let mut data = VehicleData::default();
        decode_metric(Signal::GForces, &[10, 250, 128, 7])
            .unwrap()
            .apply(&mut data);
        assert_eq!(data.g_forces, [10, 250, 128]);
    }

    #[test]
    fn test_decode_metric_short_and_empty_payloads() {
        assert!(matches!(
            decode_metric(Signal::TirePressure, &[30, 31]),
            Err(DecodeError::PayloadTooShort { expected: 4, actual: 2, .. })
        ));
        assert!(matches!(
            decode_metric(Signal::MotorTemp, &[]),
            Err(DecodeError::PayloadTooShort { expected: 1, actual: 0, .. })
        ));
    }

    #[test]
    fn test_decode_metric_rejects_structured_frames() {
        assert_eq!(
            decode_metric(Signal::VehicleState, &[0; 8]),
            Err(DecodeError::NotAMetric(Signal::VehicleState))
        );
    }
}
