//! Failure modes and their exit codes.

use std::net::TcpListener;
use std::time::Duration;

use crate::prelude::*;

#[test]
fn refused_connection_exits_unavailable() {
    let port = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .unwrap_or_else(|e| panic!("cannot reserve a port: {e}"));

    cli()
        .args(&["ping", "--host", "127.0.0.1", "--port", &port.to_string()])
        .fails_with(3)
        .stderr_has("cannot connect to 127.0.0.1");
}

#[test]
fn wrong_password_exits_unavailable() {
    let server = ScriptedServer::spawn(
        Script::new()
            .send("CONNECTED <sonic-server v1.4.9>")
            .expect("START search hunter2")
            .send("ENDED authentication_failed"),
    )
    .unwrap_or_else(|e| panic!("cannot spawn scripted server: {e}"));

    cli()
        .args(&["ping", "--host", &server.host(), "--port", &server.port().to_string()])
        .args(&["--password", "hunter2"])
        .fails_with(3)
        .stderr_has("authentication failed: authentication_failed");
    server.finish();
}

#[test]
fn empty_bucket_is_usage_error() {
    let server = server(ChannelMode::Ingest, Script::new());

    cli()
        .args(&["ingest", "count", "wiki", "", "a1"])
        .against(&server)
        .fails_with(2)
        .stderr_has("invalid argument");
    assert_received(server, &[]);
}

#[test]
fn silent_server_times_out() {
    let server = server(
        ChannelMode::Search,
        Script::new()
            .expect(r#"QUERY wiki articles "love""#)
            .send("PENDING abcd1234")
            .stall(Duration::from_millis(800)),
    );

    cli()
        .args(&["search", "query", "wiki", "articles", "love"])
        .against(&server)
        .args(&["--timeout-ms", "200"])
        .fails_with(4)
        .stderr_has("timed out");
    server.finish();
}

#[test]
fn env_supplies_connection_settings() {
    let server = server(ChannelMode::Control, Script::new().expect("PING").send("PONG"));

    cli()
        .args(&["ping", "--mode", "control"])
        .env("SONAR_HOST", &server.host())
        .env("SONAR_PORT", &server.port().to_string())
        .env("SONAR_PASSWORD", PASSWORD)
        .passes()
        .stdout_has("PONG control channel");
    assert_received(server, &["PING"]);
}
