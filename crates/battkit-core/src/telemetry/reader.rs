//! Instantaneous power readings from `/sys/class/power_supply`.

use std::fs;
use std::path::{Path, PathBuf};

use battkit_config::TelemetryConfig;
use serde::Serialize;
use tracing::debug;

/// Root of the power-supply sysfs class on a stock Linux kernel.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/power_supply";

/// Sysfs reports voltage/current/power in micro-units.
const MICRO: f64 = 1_000_000.0;

/// Stateless reader for instantaneous power metrics.
///
/// Holds only the resolved sysfs directories for the battery and the AC
/// adapter; every query re-reads the underlying attributes, so samples
/// carry no relation to prior ones. Queries have no side effects and do
/// not block beyond single sysfs file reads.
#[derive(Debug, Clone)]
pub struct TelemetryReader {
    battery_dir: PathBuf,
    adapter_dir: PathBuf,
}

/// One aggregate sample of all scalar queries plus the charging status.
///
/// Sign convention (matching the battery attributes): positive battery
/// amperage/power means charging, negative means discharging.
#[derive(Debug, Clone, Serialize)]
pub struct PowerReadings {
    pub raw_system_power_watts: f64,
    pub adapter_power_watts: f64,
    pub adapter_voltage_volts: f64,
    pub adapter_amperage_amps: f64,
    pub battery_voltage_volts: f64,
    pub battery_amperage_amps: f64,
    pub battery_power_watts: f64,
    pub charging_status: String,
}

impl Default for TelemetryReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryReader {
    /// Create a reader over the standard sysfs root, auto-detecting the
    /// battery and adapter supplies by their `type` attribute.
    pub fn new() -> Self {
        Self::with_root(Path::new(DEFAULT_SYSFS_ROOT))
    }

    /// Create a reader over an alternate sysfs root (used by tests).
    pub fn with_root(root: &Path) -> Self {
        Self::resolve(root, "", "")
    }

    /// Create a reader from the loaded telemetry configuration.
    pub fn from_config(config: &TelemetryConfig) -> Self {
        Self::resolve(
            Path::new(&config.sysfs_root),
            &config.battery_name,
            &config.adapter_name,
        )
    }

    /// Resolve supply directories: explicit names win, otherwise scan the
    /// root for the first supply of the matching `type`.
    fn resolve(root: &Path, battery_name: &str, adapter_name: &str) -> Self {
        let mut battery_dir = (!battery_name.is_empty()).then(|| root.join(battery_name));
        let mut adapter_dir = (!adapter_name.is_empty()).then(|| root.join(adapter_name));

        if battery_dir.is_none() || adapter_dir.is_none() {
            if let Ok(entries) = fs::read_dir(root) {
                for entry in entries.flatten() {
                    let dir = entry.path();
                    let Some(supply_type) = read_attr(&dir, "type") else {
                        continue;
                    };
                    match supply_type.as_str() {
                        "Battery" if battery_dir.is_none() => {
                            debug!(path = %dir.display(), "found battery supply");
                            battery_dir = Some(dir);
                        }
                        "Mains" | "USB" if adapter_dir.is_none() => {
                            debug!(path = %dir.display(), "found adapter supply");
                            adapter_dir = Some(dir);
                        }
                        _ => {}
                    }
                }
            }
        }

        Self {
            battery_dir: battery_dir.unwrap_or_else(|| root.join("BAT0")),
            adapter_dir: adapter_dir.unwrap_or_else(|| root.join("AC")),
        }
    }

    /// Sysfs directory of the battery supply.
    pub fn battery_dir(&self) -> &Path {
        &self.battery_dir
    }

    /// Watts drawn by the whole system.
    ///
    /// Derived as adapter input minus battery inflow: on battery this is
    /// the discharge power, while charging it is the adapter power not
    /// diverted into the battery. Sentinel `0.0` when neither supply
    /// reports data.
    pub fn raw_system_power(&self) -> f64 {
        (self.adapter_power() - self.battery_power()).max(0.0)
    }

    /// Watts delivered by the AC adapter; `0.0` when offline or unknown.
    pub fn adapter_power(&self) -> f64 {
        if !self.adapter_online() {
            return 0.0;
        }
        match read_micro(&self.adapter_dir, "power_now") {
            Some(watts) => watts,
            None => self.adapter_voltage() * self.adapter_amperage(),
        }
    }

    /// Volts at the adapter; `0.0` when unknown.
    pub fn adapter_voltage(&self) -> f64 {
        read_micro(&self.adapter_dir, "voltage_now").unwrap_or(0.0)
    }

    /// Amps from the adapter; `0.0` when unknown.
    pub fn adapter_amperage(&self) -> f64 {
        read_micro(&self.adapter_dir, "current_now").unwrap_or(0.0)
    }

    /// Volts at the battery terminals; `0.0` when unknown.
    pub fn battery_voltage(&self) -> f64 {
        read_micro(&self.battery_dir, "voltage_now").unwrap_or(0.0)
    }

    /// Amps into (positive) or out of (negative) the battery; `0.0` when
    /// unknown.
    pub fn battery_amperage(&self) -> f64 {
        match read_micro(&self.battery_dir, "current_now") {
            Some(amps) => self.signed_flow(amps),
            None => 0.0,
        }
    }

    /// Watts into (positive) or out of (negative) the battery; `0.0`
    /// when unknown. Uses `power_now` where the kernel exposes it,
    /// otherwise derives voltage × amperage.
    pub fn battery_power(&self) -> f64 {
        match read_micro(&self.battery_dir, "power_now") {
            Some(watts) => self.signed_flow(watts),
            None => self.battery_voltage() * self.battery_amperage(),
        }
    }

    /// The kernel's charging status label, verbatim: `Charging`,
    /// `Discharging`, `Not charging`, `Full`, or the sentinel `Unknown`.
    pub fn charging_status(&self) -> String {
        read_attr(&self.battery_dir, "status").unwrap_or_else(|| "Unknown".to_string())
    }

    /// Take one aggregate sample of every scalar query.
    pub fn readings(&self) -> PowerReadings {
        PowerReadings {
            raw_system_power_watts: self.raw_system_power(),
            adapter_power_watts: self.adapter_power(),
            adapter_voltage_volts: self.adapter_voltage(),
            adapter_amperage_amps: self.adapter_amperage(),
            battery_voltage_volts: self.battery_voltage(),
            battery_amperage_amps: self.battery_amperage(),
            battery_power_watts: self.battery_power(),
            charging_status: self.charging_status(),
        }
    }

    fn adapter_online(&self) -> bool {
        // Absent `online` attribute means the supply doesn't model
        // presence; treat it as online and let the values speak.
        match read_attr(&self.adapter_dir, "online") {
            Some(flag) => flag == "1",
            None => true,
        }
    }

    /// Kernel drivers disagree on the sign of `current_now`/`power_now`;
    /// the `status` attribute is authoritative. Positive means charging.
    fn signed_flow(&self, value: f64) -> f64 {
        match self.charging_status().as_str() {
            "Charging" => value.abs(),
            "Discharging" => -value.abs(),
            _ => value,
        }
    }
}

/// Read a sysfs attribute as a trimmed string.
pub(crate) fn read_attr(dir: &Path, attr: &str) -> Option<String> {
    fs::read_to_string(dir.join(attr))
        .ok()
        .map(|s| s.trim().to_string())
}

/// Read a micro-unit sysfs attribute, converted to base units.
pub(crate) fn read_micro(dir: &Path, attr: &str) -> Option<f64> {
    read_int(dir, attr).map(|v| v as f64 / MICRO)
}

/// Read an integer sysfs attribute.
pub(crate) fn read_int(dir: &Path, attr: &str) -> Option<i64> {
    read_attr(dir, attr)?.parse().ok()
}
