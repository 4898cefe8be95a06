//! The state store aggregate and its grouped views

use serde::Serialize;

use super::fault::FaultStatus;
use super::state::VehicleState;

/// Latest decoded value of every tracked signal
///
/// Values are the raw bytes from the bus; no scaling or unit conversion is
/// applied. Freshness is tracked separately by the staleness monitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VehicleData {
    // Charging
    pub charge_percent: u8,
    pub charging_rate: u8,
    pub full_charge_time: u8,

    // Temperatures
    pub battery_temp: u8,
    pub motor_temp: u8,
    pub inverter_temp: u8,
    pub brake_temp: u8,

    // Tires, front-left/front-right/rear-left/rear-right
    pub tire_temp: [u8; 4],
    pub tire_pressure: [u8; 4],

    // Performance
    pub power_output: u8,
    pub torque_distribution: [u8; 4],
    pub suspension_metrics: [u8; 4],
    pub g_forces: [u8; 3],

    pub vehicle_state: VehicleState,
    pub fault_status: FaultStatus,
}

/// Powertrain view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowertrainMetrics {
    pub charge_percent: u8,
    pub battery_temp: u8,
    pub motor_temp: u8,
    pub power_output: u8,
}

/// Tire view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TireMetrics {
    pub tire_temp: [u8; 4],
    pub tire_pressure: [u8; 4],
}

/// Chassis/performance view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceMetrics {
    pub power_output: u8,
    pub torque_distribution: [u8; 4],
    pub suspension_metrics: [u8; 4],
    pub g_forces: [u8; 3],
}

/// Coarse health signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// True once any state frame with a non-zero counter has been decoded
    pub receiving_messages: bool,
    pub fault_active: bool,
    pub last_state_counter: u16,
}

impl VehicleData {
    pub fn powertrain(&self) -> PowertrainMetrics {
        PowertrainMetrics {
            charge_percent: self.charge_percent,
            battery_temp: self.battery_temp,
            motor_temp: self.motor_temp,
            power_output: self.power_output,
        }
    }

    pub fn tires(&self) -> TireMetrics {
        TireMetrics {
            tire_temp: self.tire_temp,
            tire_pressure: self.tire_pressure,
        }
    }

    pub fn performance(&self) -> PerformanceMetrics {
        PerformanceMetrics {
            power_output: self.power_output,
            torque_distribution: self.torque_distribution,
            suspension_metrics: self.suspension_metrics,
            g_forces: self.g_forces,
        }
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            receiving_messages: self.vehicle_state.message_counter > 0,
            fault_active: self.fault_status.active(),
            last_state_counter: self.vehicle_state.message_counter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let data = VehicleData::default();
        assert_eq!(data.tire_temp, [0; 4]);
        assert_eq!(data.g_forces, [0; 3]);
        assert_eq!(data.fault_status, FaultStatus::default());
    }

    #[test]
    fn test_health_before_any_state_frame() {
        let health = VehicleData::default().health();
        assert!(!health.receiving_messages);
        assert!(!health.fault_active);
        assert_eq!(health.last_state_counter, 0);
    }

    #[test]
    fn test_health_tracks_counter_and_fault() {
        let mut data = VehicleData::default();
        data.vehicle_state.message_counter = 17;
        data.fault_status = FaultStatus::new(None, None, 4, 0, 0);

        let health = data.health();
        assert!(health.receiving_messages);
        assert!(health.fault_active);
        assert_eq!(health.last_state_counter, 17);
    }
}
