#![deny(unsafe_code)]

//! Configuration loading and validation for battkit.
//!
//! Loads TOML configuration files and validates them against expected
//! schemas. Provides the [`AppConfig`] type as the central configuration
//! structure shared by the CLI and the core library.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Daemon socket client configuration.
    #[serde(default)]
    pub socket: SocketConfig,

    /// Telemetry source configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for the daemon socket client.
///
/// The socket path identifies the daemon's listening endpoint; the two
/// bounds cap how long a single exchange may run and how large a reply
/// the client will accumulate before giving up on end-of-stream framing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketConfig {
    /// Filesystem path of the daemon's Unix domain socket.
    #[serde(default = "default_socket_path")]
    pub path: String,

    /// Deadline for one whole exchange (connect + write + read), in
    /// milliseconds. Must be non-zero.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum reply size accumulated from the daemon, in bytes.
    /// Must be non-zero.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            path: default_socket_path(),
            timeout_ms: default_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

fn default_socket_path() -> String {
    "/var/run/powerd.sock".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_response_bytes() -> usize {
    1024 * 1024 // 1 MiB
}

/// Configuration for the telemetry reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Root of the power-supply sysfs class.
    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: String,

    /// Battery supply name under the root (e.g. "BAT0").
    /// Empty string means auto-detect by supply type.
    #[serde(default)]
    pub battery_name: String,

    /// AC adapter supply name under the root (e.g. "AC").
    /// Empty string means auto-detect by supply type.
    #[serde(default)]
    pub adapter_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            sysfs_root: default_sysfs_root(),
            battery_name: String::new(),
            adapter_name: String::new(),
        }
    }
}

fn default_sysfs_root() -> String {
    "/sys/class/power_supply".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Existence of the socket path or the named power supplies is NOT
    /// checked here: both are runtime properties of the host and are
    /// surfaced by the client and reader when they are actually used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.socket.path.is_empty() {
            return Err(ConfigError::Validation(
                "socket.path must not be empty".to_string(),
            ));
        }
        if self.socket.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "socket.timeout_ms must be non-zero".to_string(),
            ));
        }
        if self.socket.max_response_bytes == 0 {
            return Err(ConfigError::Validation(
                "socket.max_response_bytes must be non-zero".to_string(),
            ));
        }
        if self.telemetry.sysfs_root.is_empty() {
            return Err(ConfigError::Validation(
                "telemetry.sysfs_root must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.socket.path, "/var/run/powerd.sock");
        assert_eq!(config.socket.timeout_ms, 5000);
        assert_eq!(config.socket.max_response_bytes, 1024 * 1024);
        assert_eq!(config.telemetry.sysfs_root, "/sys/class/power_supply");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml = "";
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.socket.timeout_ms, 5000);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            [socket]
            path = "/run/batt/batt.sock"
            timeout_ms = 250
            max_response_bytes = 4096

            [telemetry]
            sysfs_root = "/tmp/fake_sysfs"
            battery_name = "BAT1"
            adapter_name = "ADP1"

            [logging]
            level = "debug"
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.socket.path, "/run/batt/batt.sock");
        assert_eq!(config.socket.timeout_ms, 250);
        assert_eq!(config.socket.max_response_bytes, 4096);
        assert_eq!(config.telemetry.sysfs_root, "/tmp/fake_sysfs");
        assert_eq!(config.telemetry.battery_name, "BAT1");
        assert_eq!(config.telemetry.adapter_name, "ADP1");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_validation_rejects_empty_socket_path() {
        let toml = r#"
            [socket]
            path = ""
        "#;
        let result = AppConfig::parse(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let toml = r#"
            [socket]
            timeout_ms = 0
        "#;
        let result = AppConfig::parse(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_response_cap() {
        let toml = r#"
            [socket]
            max_response_bytes = 0
        "#;
        let result = AppConfig::parse(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_empty_sysfs_root() {
        let toml = r#"
            [telemetry]
            sysfs_root = ""
        "#;
        let result = AppConfig::parse(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_supply_names_are_not_validated() {
        // Whether "BAT9" exists is a property of the host, not the config.
        let toml = r#"
            [telemetry]
            battery_name = "BAT9"
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.telemetry.battery_name, "BAT9");
    }

    // ── Async file-based loading ──────────────────────────────────────

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("battkit.toml");
        tokio::fs::write(&path, b"[socket]\ntimeout_ms = 750\n")
            .await
            .unwrap();

        let config = AppConfig::load(&path).await.unwrap();
        assert_eq!(config.socket.timeout_ms, 750);
    }

    #[tokio::test]
    async fn test_load_nonexistent_file() {
        let result = AppConfig::load(Path::new("/nonexistent/file.toml")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_invalid_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        tokio::fs::write(&path, b"not valid toml [[[").await.unwrap();

        let result = AppConfig::load(&path).await;
        assert!(result.is_err());
    }

    // ── Error display ─────────────────────────────────────────────────

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("bad value".to_string());
        assert_eq!(err.to_string(), "validation error: bad value");
    }
}
