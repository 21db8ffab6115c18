//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn sonar_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn sonar_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("--timeout-ms");
}

#[test]
fn sonar_ingest_help_shows_subcommands() {
    cli()
        .args(&["ingest", "--help"])
        .passes()
        .stdout_has("push")
        .stdout_has("pop")
        .stdout_has("count")
        .stdout_has("flush");
}

#[test]
fn sonar_search_help_shows_subcommands() {
    cli().args(&["search", "--help"]).passes().stdout_has("query").stdout_has("suggest");
}

#[test]
fn sonar_control_help_shows_subcommands() {
    cli()
        .args(&["control", "--help"])
        .passes()
        .stdout_has("trigger")
        .stdout_has("consolidate")
        .stdout_has("backup")
        .stdout_has("restore");
}

#[test]
fn sonar_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn sonar_manual_prints_server_help() {
    let server = server(
        ChannelMode::Control,
        Script::new().expect("HELP commands").send("RESULT commands(TRIGGER, PING, HELP, QUIT)"),
    );

    cli()
        .args(&["manual", "commands", "--mode", "control"])
        .against(&server)
        .passes()
        .stdout_eq("commands(TRIGGER, PING, HELP, QUIT)\n");
    assert_received(server, &["HELP commands"]);
}

#[test]
fn sonar_ping_reports_channel() {
    let server = server(ChannelMode::Ingest, Script::new().expect("PING").send("PONG"));

    cli()
        .args(&["ping", "--mode", "ingest"])
        .against(&server)
        .passes()
        .stdout_eq("PONG ingest channel, protocol 1, buffer 20000\n");
    assert_received(server, &["PING"]);
}

#[test]
fn sonar_ping_json_includes_banner() {
    let server = server(ChannelMode::Search, Script::new().expect("PING").send("PONG"));

    let output = cli().args(&["ping", "-o", "json"]).against(&server).passes();
    let report = output.stdout_json();
    assert_eq!(report["mode"], "search");
    assert_eq!(report["buffer"], 20000);
    assert_eq!(report["banner"], "<sonic-server v1.4.9>");
    assert_received(server, &["PING"]);
}
