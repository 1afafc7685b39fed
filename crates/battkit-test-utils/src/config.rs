//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values
//! without repeating boilerplate across crate boundaries.

use battkit_config::AppConfig;

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .socket_path("/tmp/test-powerd.sock")
///     .timeout_ms(200)
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn socket_path(mut self, path: &str) -> Self {
        self.config.socket.path = path.to_string();
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.socket.timeout_ms = timeout_ms;
        self
    }

    pub fn max_response_bytes(mut self, cap: usize) -> Self {
        self.config.socket.max_response_bytes = cap;
        self
    }

    pub fn sysfs_root(mut self, root: &str) -> Self {
        self.config.telemetry.sysfs_root = root.to_string();
        self
    }

    pub fn battery_name(mut self, name: &str) -> Self {
        self.config.telemetry.battery_name = name.to_string();
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
