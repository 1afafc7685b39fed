//! Fake power-supply sysfs trees for telemetry tests.
//!
//! [`FakeSysfs`] owns a temp directory shaped like
//! `/sys/class/power_supply`; the [`battery`](FakeSysfs::battery) and
//! [`adapter`](FakeSysfs::adapter) builders create supply directories
//! with the right `type` attribute, and [`SupplyBuilder::attr`] writes
//! individual attribute files the way the kernel does (trailing newline).

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temp-dir tree mimicking the power-supply sysfs class.
pub struct FakeSysfs {
    root: TempDir,
}

impl FakeSysfs {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Root directory, to be passed to `TelemetryReader::with_root`.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Create a supply directory with `type = Battery`.
    pub fn battery(&self, name: &str) -> SupplyBuilder {
        self.supply(name, "Battery")
    }

    /// Create a supply directory with `type = Mains`.
    pub fn adapter(&self, name: &str) -> SupplyBuilder {
        self.supply(name, "Mains")
    }

    /// Create a supply directory with an arbitrary `type`.
    pub fn supply(&self, name: &str, supply_type: &str) -> SupplyBuilder {
        let dir = self.root.path().join(name);
        fs::create_dir_all(&dir).expect("failed to create supply dir");
        SupplyBuilder { dir }.attr("type", supply_type)
    }
}

impl Default for FakeSysfs {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent writer for the attribute files of one supply directory.
pub struct SupplyBuilder {
    dir: PathBuf,
}

impl SupplyBuilder {
    /// Write an attribute file with a trailing newline, as sysfs does.
    pub fn attr(self, name: &str, value: &str) -> Self {
        fs::write(self.dir.join(name), format!("{value}\n")).expect("failed to write attribute");
        self
    }

    /// Directory of this supply.
    pub fn path(&self) -> &Path {
        &self.dir
    }
}
