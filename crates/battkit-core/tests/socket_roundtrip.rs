//! End-to-end exercises of the socket command client against scripted
//! stub daemons, covering the full classified error surface.

use std::time::{Duration, Instant};

use battkit_core::socket::{ClientError, SocketClient, daemon_available};
use battkit_test_utils::config::TestConfigBuilder;
use battkit_test_utils::stub_daemon::{DaemonBehavior, StubDaemon};
use battkit_test_utils::tracing_setup::init_test_tracing;

#[tokio::test]
async fn echo_daemon_returns_exact_command_text() {
    init_test_tracing();
    let daemon = StubDaemon::spawn(DaemonBehavior::EchoDecimal).await;
    let client = SocketClient::new();

    for command in [0i64, 7, 42, -3, i64::MAX, i64::MIN] {
        let reply = client
            .send_command(command, daemon.socket_path())
            .await
            .unwrap();
        assert_eq!(reply, command.to_string());
    }
}

#[tokio::test]
async fn missing_socket_is_connection_failed_for_every_command() {
    let client = SocketClient::new();
    for command in [0i64, 1, -1, 9999] {
        let err = client
            .send_command(command, "/tmp/battkit-no-such-daemon.sock")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ConnectionFailed { .. }));
    }
}

#[tokio::test]
async fn silent_daemon_times_out_within_bound() {
    let daemon = StubDaemon::spawn(DaemonBehavior::Silent).await;
    let timeout = Duration::from_millis(200);
    let client = SocketClient::with_limits(timeout, 1024);

    let started = Instant::now();
    let err = client
        .send_command(1, daemon.socket_path())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout { .. }));
    // Must resolve within 2x the configured timeout, never hang.
    assert!(started.elapsed() < timeout * 2);
}

#[tokio::test]
async fn invalid_utf8_reply_is_decode_failed() {
    let daemon = StubDaemon::spawn(DaemonBehavior::Reply(vec![0xff, 0xfe, 0xfd])).await;
    let client = SocketClient::new();

    let err = client
        .send_command(1, daemon.socket_path())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::DecodeFailed(_)));
}

#[tokio::test]
async fn daemon_closing_without_reply_yields_empty_response() {
    let daemon = StubDaemon::spawn(DaemonBehavior::CloseImmediately).await;
    let client = SocketClient::new();

    let reply = client.send_command(1, daemon.socket_path()).await.unwrap();
    assert_eq!(reply, "");
}

#[tokio::test]
async fn oversized_reply_stops_at_the_configured_cap() {
    // The daemon writes past the cap and never closes; the client must
    // stop reading at the cap instead of timing out or growing without
    // bound.
    let daemon = StubDaemon::spawn(DaemonBehavior::ReplyThenHang(vec![b'x'; 64 * 1024])).await;
    let client = SocketClient::with_limits(Duration::from_secs(5), 1000);

    let reply = client.send_command(1, daemon.socket_path()).await.unwrap();
    assert_eq!(reply.len(), 1000);
}

#[tokio::test]
async fn concurrent_calls_get_independently_paired_responses() {
    let daemon = StubDaemon::spawn(DaemonBehavior::EchoDecimal).await;
    let client = SocketClient::new();

    let first = {
        let client = client.clone();
        let path = daemon.socket_path().to_path_buf();
        tokio::spawn(async move { client.send_command(11, path).await })
    };
    let second = {
        let client = client.clone();
        let path = daemon.socket_path().to_path_buf();
        tokio::spawn(async move { client.send_command(42, path).await })
    };

    assert_eq!(first.await.unwrap().unwrap(), "11");
    assert_eq!(second.await.unwrap().unwrap(), "42");
}

#[tokio::test]
async fn client_from_config_uses_configured_bounds() {
    let daemon = StubDaemon::spawn(DaemonBehavior::Silent).await;
    let config = TestConfigBuilder::new().timeout_ms(150).build();
    let client = SocketClient::from_config(&config.socket);

    let started = Instant::now();
    let err = client
        .send_command(3, daemon.socket_path())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Timeout { .. }));
    assert!(started.elapsed() < Duration::from_millis(300));
}

#[tokio::test]
async fn daemon_available_tracks_socket_existence() {
    let daemon = StubDaemon::spawn(DaemonBehavior::EchoDecimal).await;
    assert!(daemon_available(daemon.socket_path()));
    assert!(!daemon_available("/tmp/battkit-no-such-daemon.sock"));
}
