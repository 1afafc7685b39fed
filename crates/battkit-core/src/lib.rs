#![deny(unsafe_code)]

//! battkit core — power telemetry and daemon socket control.
//!
//! Provides the two client-side components of the battkit suite: a
//! stateless [`telemetry::TelemetryReader`] over the Linux power-supply
//! sysfs class, and a one-shot [`socket::SocketClient`] that exchanges a
//! single command with the privileged power daemon over a Unix domain
//! socket. The two components are independent; neither holds state
//! across calls.

/// One-shot command client for the power daemon's Unix socket.
pub mod socket;
/// Read-only power and battery telemetry from sysfs.
pub mod telemetry;

pub use socket::{ClientError, SocketClient};
pub use telemetry::{BatterySnapshot, PowerReadings, TelemetryReader};
