//! Scripted stand-ins for the power daemon.
//!
//! [`StubDaemon`] binds a Unix socket in an owned temp directory and
//! serves one [`DaemonBehavior`] per accepted connection. Connections
//! are handled concurrently, so tests can exercise parallel client
//! calls against a single daemon.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};

/// What the stub does with each accepted connection.
///
/// Every behavior first reads the request to end-of-stream (the client
/// half-closes after writing), mirroring the real daemon's framing.
#[derive(Debug, Clone)]
pub enum DaemonBehavior {
    /// Write the received request bytes back verbatim, then close.
    /// For a well-formed client this echoes the command's decimal text.
    EchoDecimal,
    /// Write a fixed reply, then close.
    Reply(Vec<u8>),
    /// Write a fixed reply, then hold the connection open forever.
    ReplyThenHang(Vec<u8>),
    /// Never reply and never close.
    Silent,
    /// Close the connection without reading or writing.
    CloseImmediately,
}

/// A test-scoped daemon with an owned temp directory for its socket.
///
/// The accept loop is aborted and the temp directory deleted when this
/// value is dropped, guaranteeing cleanup even on panic.
pub struct StubDaemon {
    socket_path: PathBuf,
    accept_task: tokio::task::JoinHandle<()>,
    _temp_dir: TempDir,
}

impl StubDaemon {
    /// Bind a fresh socket and start serving `behavior`.
    pub async fn spawn(behavior: DaemonBehavior) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let socket_path = temp_dir.path().join("powerd.sock");
        let listener = UnixListener::bind(&socket_path).expect("failed to bind stub socket");

        let accept_task = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(serve_connection(stream, behavior.clone()));
            }
        });

        Self {
            socket_path,
            accept_task,
            _temp_dir: temp_dir,
        }
    }

    /// Path of the daemon's listening socket.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for StubDaemon {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

async fn serve_connection(mut stream: UnixStream, behavior: DaemonBehavior) {
    if matches!(behavior, DaemonBehavior::CloseImmediately) {
        return;
    }

    let mut request = Vec::new();
    if stream.read_to_end(&mut request).await.is_err() {
        return;
    }

    match behavior {
        DaemonBehavior::EchoDecimal => {
            let _ = stream.write_all(&request).await;
            // Dropping the stream closes the connection, which is the
            // reply's framing signal.
        }
        DaemonBehavior::Reply(bytes) => {
            let _ = stream.write_all(&bytes).await;
        }
        DaemonBehavior::ReplyThenHang(bytes) => {
            if stream.write_all(&bytes).await.is_err() {
                return;
            }
            std::future::pending::<()>().await;
        }
        DaemonBehavior::Silent => {
            std::future::pending::<()>().await;
        }
        DaemonBehavior::CloseImmediately => unreachable!("handled above"),
    }
}
