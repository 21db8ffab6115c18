//! `sonar ingest` specs

use crate::prelude::*;

#[test]
fn push_escapes_text_on_the_wire() {
    let server = server(
        ChannelMode::Ingest,
        Script::new()
            .expect(r#"PUSH messages user:1 conv:9 "say\ \"hi\"" LANG(eng)"#)
            .send("OK"),
    );

    cli()
        .args(&["ingest", "push", "messages", "user:1", "conv:9", "say \"hi\"", "--lang", "eng"])
        .against(&server)
        .passes()
        .stdout_eq("Pushed to messages/user:1/conv:9\n");
    assert_received(server, &[r#"PUSH messages user:1 conv:9 "say\ \"hi\"" LANG(eng)"#]);
}

#[test]
fn count_prints_number() {
    let server =
        server(ChannelMode::Ingest, Script::new().expect("COUNT wiki articles").send("RESULT 42"));

    cli()
        .args(&["ingest", "count", "wiki", "articles"])
        .against(&server)
        .passes()
        .stdout_eq("42\n");
    assert_received(server, &["COUNT wiki articles"]);
}

#[test]
fn flush_bucket_reports_json_count() {
    let server =
        server(ChannelMode::Ingest, Script::new().expect("FLUSHB wiki articles").send("RESULT 7"));

    let output = cli()
        .args(&["ingest", "flush", "wiki", "articles", "-o", "json"])
        .against(&server)
        .passes();
    assert_eq!(output.stdout_json(), serde_json::json!({ "flushed": 7 }));
    assert_received(server, &["FLUSHB wiki articles"]);
}

#[test]
fn pop_prints_removed_count() {
    let server = server(
        ChannelMode::Ingest,
        Script::new().expect(r#"POP wiki articles a1 "love""#).send("RESULT 1"),
    );

    cli()
        .args(&["ingest", "pop", "wiki", "articles", "a1", "love"])
        .against(&server)
        .passes()
        .stdout_eq("1\n");
    assert_received(server, &[r#"POP wiki articles a1 "love""#]);
}

#[test]
fn server_err_fails_with_reason() {
    let server = server(
        ChannelMode::Ingest,
        Script::new().expect(r#"PUSH wiki articles a1 "love""#).send("ERR text_too_long"),
    );

    cli()
        .args(&["ingest", "push", "wiki", "articles", "a1", "love"])
        .against(&server)
        .fails_with(1)
        .stderr_has("PUSH rejected: text_too_long");
    server.finish();
}
