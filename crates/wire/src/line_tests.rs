// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn encode_bare_verb() {
    assert_eq!(encode(&Command::new(Verb::Ping)), "PING\n");
}

#[test]
fn encode_push_escapes_words_and_quotes_text() {
    let cmd = Command::new(Verb::Push)
        .word("wiki")
        .word("articles")
        .word("article 1")
        .text("for the love of god");
    assert_eq!(encode(&cmd), "PUSH wiki articles article\\ 1 \"for\\ the\\ love\\ of\\ god\"\n");
}

#[test]
fn encode_query_with_flags() {
    let cmd = Command::new(Verb::Query)
        .word("wiki")
        .word("articles")
        .text("love")
        .flag("LIMIT", 10)
        .flag_opt("OFFSET", None::<u32>)
        .flag_opt("LANG", Some("eng"));
    assert_eq!(encode(&cmd), "QUERY wiki articles \"love\" LIMIT(10) LANG(eng)\n");
}

#[test]
fn encode_word_opt_skips_none() {
    let cmd = Command::new(Verb::Count).word("wiki").word_opt(None::<&str>).word_opt(Some("b"));
    assert_eq!(encode(&cmd), "COUNT wiki b\n");
}

#[test]
fn check_len_ignores_terminator() {
    assert!(check_len("PING\n", 4).is_ok());
    assert_eq!(check_len("PING\n", 3), Err(WireError::CommandTooLarge { len: 4, max: 3 }));
}

#[yare::parameterized(
    bare            = { "PONG\n",                    "PONG",    &[] },
    crlf            = { "OK\r\n",                    "OK",      &[] },
    no_terminator   = { "RESULT 42",                 "RESULT",  &["42"] },
    event           = { "EVENT QUERY abc a b\n",     "EVENT",   &["QUERY", "abc", "a", "b"] },
    escaped_space   = { "EVENT QUERY m a\\ b c\n",   "EVENT",   &["QUERY", "m", "a\\ b", "c"] },
    double_space    = { "EVENT QUERY  m\n",          "EVENT",   &["QUERY", "m"] },
    trailing_space  = { "EVENT QUERY m \n",          "EVENT",   &["QUERY", "m"] },
)]
fn decode_splits_on_unescaped_spaces(input: &str, verb: &str, args: &[&str]) {
    let line = decode(input).unwrap();
    assert_eq!(line.verb, verb);
    assert_eq!(line.args, args);
}

#[yare::parameterized(
    empty       = { "" },
    newline     = { "\n" },
    blank       = { "   \n" },
    leading     = { " OK\n" },
)]
fn decode_rejects_lines_without_verb(input: &str) {
    assert!(matches!(decode(input), Err(WireError::MalformedLine { .. })));
}

#[test]
fn rest_keeps_free_form_text() {
    let line = decode("ERR invalid_format(QUERY <collection> <bucket>)\n").unwrap();
    assert_eq!(line.rest(), "invalid_format(QUERY <collection> <bucket>)");
    assert_eq!(line.raw(), "ERR invalid_format(QUERY <collection> <bucket>)");
}

#[test]
fn rest_of_bare_verb_is_empty() {
    assert_eq!(decode("OK\n").unwrap().rest(), "");
}

#[test]
fn parse_flag_extracts_value() {
    assert_eq!(parse_flag("protocol(1)", "protocol").unwrap(), "1");
    assert_eq!(parse_flag("buffer(20000)", "buffer").unwrap(), "20000");
    assert!(parse_flag("buffer(20000", "buffer").is_err());
    assert!(parse_flag("protocol(1)", "buffer").is_err());
}
