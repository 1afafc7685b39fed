#![deny(unsafe_code)]

//! Shared test utilities for the battkit workspace.
//!
//! Provides reusable fixtures — scripted stub daemons, fake sysfs trees,
//! config builders, and tracing helpers — so that individual crate tests
//! stay concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! battkit-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod stub_daemon;
pub mod sysfs;
pub mod tracing_setup;
