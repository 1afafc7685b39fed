//! Battery identity and health snapshot.
//!
//! Aggregates the slow-moving battery attributes (capacities, cycle
//! count, serial number) that sit alongside the instantaneous readings
//! in the same sysfs directory. Same best-effort contract as the scalar
//! queries: missing attributes degrade to sentinels, never errors.

use serde::Serialize;

use super::reader::{TelemetryReader, read_attr, read_int};

/// One-shot aggregate of battery identity and health.
#[derive(Debug, Clone, Serialize)]
pub struct BatterySnapshot {
    /// Current charge as a percentage of full capacity.
    pub percent: u8,
    /// Design capacity in µAh; `0` when the kernel does not report it.
    pub design_capacity_uah: u64,
    /// Current full-charge capacity in µAh; `0` when unreported.
    pub full_capacity_uah: u64,
    /// Full capacity over design capacity, as a percentage. `0.0` when
    /// the design capacity is unknown.
    pub health_percent: f64,
    /// Number of charge cycles the battery has undergone.
    pub cycle_count: u32,
    /// Battery temperature in degrees Celsius; `0.0` when unreported.
    pub temperature_celsius: f64,
    /// Battery serial number; `"--"` when unreported.
    pub serial_number: String,
    /// The kernel's charging status label, verbatim.
    pub status: String,
    /// Whether the status reports active charging.
    pub is_charging: bool,
}

impl TelemetryReader {
    /// Take a snapshot of battery identity and health.
    pub fn battery_snapshot(&self) -> BatterySnapshot {
        let dir = self.battery_dir();

        let percent = read_int(dir, "capacity")
            .map(|v| v.clamp(0, 100) as u8)
            .unwrap_or(0);
        let design_capacity_uah = read_int(dir, "charge_full_design")
            .map(|v| v.max(0) as u64)
            .unwrap_or(0);
        let full_capacity_uah = read_int(dir, "charge_full")
            .map(|v| v.max(0) as u64)
            .unwrap_or(0);
        let health_percent = if design_capacity_uah > 0 {
            full_capacity_uah as f64 / design_capacity_uah as f64 * 100.0
        } else {
            0.0
        };
        let cycle_count = read_int(dir, "cycle_count")
            .map(|v| v.max(0) as u32)
            .unwrap_or(0);
        // Sysfs reports temperature in tenths of a degree Celsius.
        let temperature_celsius = read_int(dir, "temp")
            .map(|v| v as f64 / 10.0)
            .unwrap_or(0.0);
        let serial_number =
            read_attr(dir, "serial_number").unwrap_or_else(|| "--".to_string());
        let status = self.charging_status();
        let is_charging = status == "Charging";

        BatterySnapshot {
            percent,
            design_capacity_uah,
            full_capacity_uah,
            health_percent,
            cycle_count,
            temperature_celsius,
            serial_number,
            status,
            is_charging,
        }
    }
}
