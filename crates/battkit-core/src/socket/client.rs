//! Socket command client — one request/response exchange per call.
//!
//! [`SocketClient`] is a pure function of its two call inputs (command
//! value, socket path) plus two configured bounds: a whole-exchange
//! deadline and a reply size cap. It keeps no connection state, so
//! concurrent calls from different tasks are fully independent.

use std::path::{Path, PathBuf};
use std::time::Duration;

use battkit_config::SocketConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tracing::debug;

use super::wire;

/// Default deadline for one whole exchange (connect + write + read).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default cap on accumulated reply bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Errors from a single command exchange.
///
/// Every failure mode is classified so callers can branch on the variant:
/// retry is reasonable on [`Timeout`](ClientError::Timeout), while
/// [`ConnectionFailed`](ClientError::ConnectionFailed) usually means the
/// daemon is not running and should be surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to connect to daemon socket at {path}: {source}")]
    ConnectionFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to transmit command: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("daemon did not finish replying within {after:?}")]
    Timeout { after: Duration },

    #[error("daemon reply is not valid UTF-8: {0}")]
    DecodeFailed(#[source] std::str::Utf8Error),
}

/// Check whether the daemon socket exists (daemon is likely running).
pub fn daemon_available(socket_path: impl AsRef<Path>) -> bool {
    socket_path.as_ref().exists()
}

/// Client for sending commands to the power daemon via Unix socket.
///
/// Cheap to construct and to clone; holds only the configured bounds.
/// Dropping the future returned by [`send_command`](Self::send_command)
/// aborts the exchange by closing the connection — an aborted call never
/// yields a partial response.
#[derive(Debug, Clone)]
pub struct SocketClient {
    timeout: Duration,
    max_response_bytes: usize,
}

impl Default for SocketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SocketClient {
    /// Create a client with the default deadline and reply cap.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TIMEOUT, DEFAULT_MAX_RESPONSE_BYTES)
    }

    /// Create a client with explicit bounds.
    pub fn with_limits(timeout: Duration, max_response_bytes: usize) -> Self {
        Self {
            timeout,
            max_response_bytes,
        }
    }

    /// Create a client from the loaded socket configuration.
    pub fn from_config(config: &SocketConfig) -> Self {
        Self::with_limits(
            Duration::from_millis(config.timeout_ms),
            config.max_response_bytes,
        )
    }

    /// Send one command to the daemon at `socket_path` and return its
    /// textual reply.
    ///
    /// Opens a fresh connection, writes the command in its wire form,
    /// half-closes the write side, and accumulates the reply until the
    /// daemon closes the connection or the reply cap is reached. The
    /// whole exchange runs under the configured deadline. The connection
    /// is closed on every exit path; no retries are performed — calling
    /// twice sends two independent requests.
    pub async fn send_command(
        &self,
        command: i64,
        socket_path: impl AsRef<Path>,
    ) -> Result<String, ClientError> {
        let path = socket_path.as_ref();
        let after = self.timeout;
        match tokio::time::timeout(after, self.exchange(command, path)).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout { after }),
        }
    }

    async fn exchange(&self, command: i64, path: &Path) -> Result<String, ClientError> {
        let mut stream =
            UnixStream::connect(path)
                .await
                .map_err(|source| ClientError::ConnectionFailed {
                    path: path.to_path_buf(),
                    source,
                })?;

        debug!(command, path = %path.display(), "sending daemon command");

        let request = wire::encode_command(command);
        stream
            .write_all(request.as_bytes())
            .await
            .map_err(ClientError::WriteFailed)?;
        // Half-close so the daemon sees end-of-request. The reply is
        // framed solely by the daemon closing its side.
        stream.shutdown().await.map_err(ClientError::WriteFailed)?;

        // Cap the read: a daemon that streams forever must not exhaust
        // memory. Reaching the cap ends the read as if the stream closed.
        let mut reply = Vec::new();
        let mut limited = stream.take(self.max_response_bytes as u64);
        limited
            .read_to_end(&mut reply)
            .await
            .map_err(|source| ClientError::ConnectionFailed {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(bytes = reply.len(), "daemon reply received");
        wire::decode_response(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_limits() {
        let client = SocketClient::new();
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);
        assert_eq!(client.max_response_bytes, DEFAULT_MAX_RESPONSE_BYTES);
    }

    #[test]
    fn test_from_config() {
        let config = SocketConfig {
            path: "/tmp/powerd.sock".to_string(),
            timeout_ms: 250,
            max_response_bytes: 4096,
        };
        let client = SocketClient::from_config(&config);
        assert_eq!(client.timeout, Duration::from_millis(250));
        assert_eq!(client.max_response_bytes, 4096);
    }

    #[test]
    fn test_daemon_available_missing_path() {
        assert!(!daemon_available("/tmp/nonexistent-battkit.sock"));
    }

    #[tokio::test]
    async fn test_missing_socket_is_connection_failed() {
        let client = SocketClient::new();
        let err = client
            .send_command(1, "/tmp/nonexistent-battkit.sock")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ConnectionFailed { .. }));
    }

    #[test]
    fn test_error_display_names_the_path() {
        let err = ClientError::ConnectionFailed {
            path: PathBuf::from("/run/powerd.sock"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/run/powerd.sock"));
    }
}
