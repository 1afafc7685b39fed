//! Daemon control — Unix domain socket command transport.
//!
//! The power daemon listens on a filesystem-addressed Unix socket and
//! executes integer commands. Each exchange uses a fresh connection:
//! the client writes the command, half-closes its side, and reads the
//! reply until the daemon closes the connection.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐        Unix socket         ┌──────────────┐
//! │  caller  │───────────────────────────▶│    daemon    │
//! │          │  decimal command ▶         │ (privileged, │
//! │          │  ◀ reply bytes + close     │   external)  │
//! └──────────┘                            └──────────────┘
//! ```
//!
//! There is no handshake, versioning, or multiplexing; end-of-stream is
//! the sole framing signal. Command values are opaque to this crate —
//! their meaning is owned by the daemon.

pub mod client;
pub mod wire;

pub use client::{
    ClientError, DEFAULT_MAX_RESPONSE_BYTES, DEFAULT_TIMEOUT, SocketClient, daemon_available,
};
