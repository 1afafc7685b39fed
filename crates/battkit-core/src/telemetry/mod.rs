//! Power telemetry — read-only queries against the power-supply sysfs class.
//!
//! Every query is best-effort: a missing or unparsable attribute degrades
//! to a documented sentinel (`0.0` for scalars, `"Unknown"` for the
//! charging status) instead of an error, so partial telemetry never
//! blocks a caller. Units are converted exactly once, from the kernel's
//! micro-units to volts, amps, and watts.

pub mod battery;
pub mod reader;

pub use battery::BatterySnapshot;
pub use reader::{DEFAULT_SYSFS_ROOT, PowerReadings, TelemetryReader};
