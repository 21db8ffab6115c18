//! `sonar control` specs

use crate::prelude::*;

#[test]
fn backup_triggers_with_path() {
    let server = server(
        ChannelMode::Control,
        Script::new().expect("TRIGGER backup /var/backups/2026-10-15").send("OK"),
    );

    cli()
        .args(&["control", "backup", "/var/backups/2026-10-15"])
        .against(&server)
        .passes()
        .stdout_eq("Backed up to /var/backups/2026-10-15\n");
    assert_received(server, &["TRIGGER backup /var/backups/2026-10-15"]);
}

#[test]
fn consolidate_json_reports_ok() {
    let server =
        server(ChannelMode::Control, Script::new().expect("TRIGGER consolidate").send("OK"));

    let output = cli().args(&["control", "consolidate", "-o", "json"]).against(&server).passes();
    assert_eq!(output.stdout_json(), serde_json::json!({ "status": "ok" }));
    assert_received(server, &["TRIGGER consolidate"]);
}

#[test]
fn trigger_passes_action_through() {
    let server = server(ChannelMode::Control, Script::new().expect("TRIGGER restore snap").send("OK"));

    cli()
        .args(&["control", "trigger", "restore", "snap"])
        .against(&server)
        .passes()
        .stdout_eq("Triggered restore\n");
    assert_received(server, &["TRIGGER restore snap"]);
}
