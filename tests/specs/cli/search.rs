//! `sonar search` specs

use crate::prelude::*;

#[test]
fn query_prints_matching_objects() {
    let server = server(
        ChannelMode::Search,
        Script::new()
            .expect(r#"QUERY wiki articles "love""#)
            .send("PENDING abcd1234")
            .send("EVENT QUERY abcd1234 article-1 article-3"),
    );

    cli()
        .args(&["search", "query", "wiki", "articles", "love"])
        .against(&server)
        .passes()
        .stdout_eq("article-1\narticle-3\n");
    assert_received(server, &[r#"QUERY wiki articles "love""#]);
}

#[test]
fn query_json_is_array() {
    let server = server(
        ChannelMode::Search,
        Script::new()
            .expect(r#"QUERY wiki articles "love\ story" LIMIT(5) OFFSET(10) LANG(eng)"#)
            .send("PENDING m1")
            .send("EVENT QUERY m1 article-9"),
    );

    let output = cli()
        .args(&["-o", "json", "search", "query", "wiki", "articles", "love story"])
        .args(&["--limit", "5", "--offset", "10", "--lang", "eng"])
        .against(&server)
        .passes();
    assert_eq!(output.stdout_json(), serde_json::json!(["article-9"]));
    assert_received(
        server,
        &[r#"QUERY wiki articles "love\ story" LIMIT(5) OFFSET(10) LANG(eng)"#],
    );
}

#[test]
fn query_with_no_hits_says_so() {
    let server = server(
        ChannelMode::Search,
        Script::new()
            .expect(r#"QUERY wiki articles "zzz""#)
            .send("PENDING m2")
            .send("EVENT QUERY m2"),
    );

    cli()
        .args(&["search", "query", "wiki", "articles", "zzz"])
        .against(&server)
        .passes()
        .stdout_eq("No results\n");
    assert_received(server, &[r#"QUERY wiki articles "zzz""#]);
}

#[test]
fn mismatched_marker_fails_with_protocol_exit() {
    let server = server(
        ChannelMode::Search,
        Script::new()
            .expect(r#"QUERY wiki articles "love""#)
            .send("PENDING abcd1234")
            .send("EVENT QUERY ffff0000 article-1"),
    );

    cli()
        .args(&["search", "query", "wiki", "articles", "love"])
        .against(&server)
        .fails_with(4)
        .stderr_has("protocol violation")
        .stdout_lacks("article-1");
    server.finish();
}

#[test]
fn suggest_prints_words() {
    let server = server(
        ChannelMode::Search,
        Script::new()
            .expect(r#"SUGGEST wiki articles "lov" LIMIT(2)"#)
            .send("PENDING s1")
            .send("EVENT SUGGEST s1 love lovely"),
    );

    cli()
        .args(&["search", "suggest", "wiki", "articles", "lov", "--limit", "2"])
        .against(&server)
        .passes()
        .stdout_eq("love\nlovely\n");
    assert_received(server, &[r#"SUGGEST wiki articles "lov" LIMIT(2)"#]);
}
