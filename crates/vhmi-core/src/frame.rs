//! Bus frames and the table of recognized signal identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// Maximum payload of a classic CAN data frame
pub const MAX_PAYLOAD: usize = 8;

/// One frame drawn from the bus: an identifier plus up to 8 payload bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanFrame {
    /// Arbitration identifier (11-bit or 29-bit, raw)
    pub id: u32,
    /// Payload bytes (0-8)
    pub data: Vec<u8>,
}

impl CanFrame {
    pub fn new(id: u32, data: &[u8]) -> Result<Self, FrameError> {
        if data.len() > MAX_PAYLOAD {
            return Err(FrameError::PayloadTooLong(data.len()));
        }
        Ok(Self {
            id,
            data: data.to_vec(),
        })
    }

    /// The recognized signal carried by this frame, if any
    pub fn signal(&self) -> Option<Signal> {
        Signal::from_id(self.id)
    }
}

/// Payload layout a signal is decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 6-byte vehicle state frame
    VehicleState,
    /// 8-byte fault status frame
    FaultStatus,
    /// Single raw byte
    Scalar,
    /// Fixed number of raw bytes in position order
    Array(usize),
}

/// Every identifier the service knows how to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    ChargePercentage,
    ChargingRate,
    EstimatedFullChargeTime,
    BatteryTemp,
    MotorTemp,
    InverterTemp,
    TireTemp,
    TirePressure,
    PowerOutput,
    TorqueDistribution,
    SuspensionMetrics,
    GForces,
    BrakeTemp,
    VehicleState,
    FaultStatus,
}

impl Signal {
    pub const ALL: [Signal; 15] = [
        Signal::ChargePercentage,
        Signal::ChargingRate,
        Signal::EstimatedFullChargeTime,
        Signal::BatteryTemp,
        Signal::MotorTemp,
        Signal::InverterTemp,
        Signal::TireTemp,
        Signal::TirePressure,
        Signal::PowerOutput,
        Signal::TorqueDistribution,
        Signal::SuspensionMetrics,
        Signal::GForces,
        Signal::BrakeTemp,
        Signal::VehicleState,
        Signal::FaultStatus,
    ];

    /// Look up the signal for a bus identifier
    pub fn from_id(id: u32) -> Option<Self> {
        let signal = match id {
            0x101 => Signal::ChargePercentage,
            0x102 => Signal::ChargingRate,
            0x103 => Signal::EstimatedFullChargeTime,
            0x104 => Signal::BatteryTemp,
            0x201 => Signal::MotorTemp,
            0x202 => Signal::InverterTemp,
            0x301 => Signal::TireTemp,
            0x302 => Signal::TirePressure,
            0x401 => Signal::PowerOutput,
            0x402 => Signal::TorqueDistribution,
            0x403 => Signal::SuspensionMetrics,
            0x404 => Signal::GForces,
            0x405 => Signal::BrakeTemp,
            0x600 => Signal::VehicleState,
            0x601 => Signal::FaultStatus,
            _ => return None,
        };
        Some(signal)
    }

    /// Bus identifier of this signal
    pub fn id(self) -> u32 {
        match self {
            Signal::ChargePercentage => 0x101,
            Signal::ChargingRate => 0x102,
            Signal::EstimatedFullChargeTime => 0x103,
            Signal::BatteryTemp => 0x104,
            Signal::MotorTemp => 0x201,
            Signal::InverterTemp => 0x202,
            Signal::TireTemp => 0x301,
            Signal::TirePressure => 0x302,
            Signal::PowerOutput => 0x401,
            Signal::TorqueDistribution => 0x402,
            Signal::SuspensionMetrics => 0x403,
            Signal::GForces => 0x404,
            Signal::BrakeTemp => 0x405,
            Signal::VehicleState => 0x600,
            Signal::FaultStatus => 0x601,
        }
    }

    /// Configuration/log name of this signal
    pub fn name(self) -> &'static str {
        match self {
            Signal::ChargePercentage => "charge_percentage",
            Signal::ChargingRate => "charging_rate",
            Signal::EstimatedFullChargeTime => "estimated_full_charge_time",
            Signal::BatteryTemp => "battery_temp",
            Signal::MotorTemp => "motor_temp",
            Signal::InverterTemp => "inverter_temp",
            Signal::TireTemp => "tire_temp",
            Signal::TirePressure => "tire_pressure",
            Signal::PowerOutput => "power_output",
            Signal::TorqueDistribution => "torque_distribution",
            Signal::SuspensionMetrics => "suspension_metrics",
            Signal::GForces => "g_forces",
            Signal::BrakeTemp => "brake_temp",
            Signal::VehicleState => "vehicle_state",
            Signal::FaultStatus => "fault_status",
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            Signal::VehicleState => Layout::VehicleState,
            Signal::FaultStatus => Layout::FaultStatus,
            Signal::TireTemp
            | Signal::TirePressure
            | Signal::TorqueDistribution
            | Signal::SuspensionMetrics => Layout::Array(4),
            Signal::GForces => Layout::Array(3),
            Signal::ChargePercentage
            | Signal::ChargingRate
            | Signal::EstimatedFullChargeTime
            | Signal::BatteryTemp
            | Signal::MotorTemp
            | Signal::InverterTemp
            | Signal::PowerOutput
            | Signal::BrakeTemp => Layout::Scalar,
        }
    }

    /// Minimum payload length the layout reads from
    pub fn min_payload(self) -> usize {
        match self.layout() {
            Layout::VehicleState => 6,
            Layout::FaultStatus => 8,
            Layout::Scalar => 1,
            Layout::Array(n) => n,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:03X})", self.name(), self.id())
    }
}
