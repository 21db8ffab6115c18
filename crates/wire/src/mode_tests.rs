// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    search  = { "search",  ChannelMode::Search },
    ingest  = { "ingest",  ChannelMode::Ingest },
    control = { "control", ChannelMode::Control },
)]
fn mode_parses_and_displays(name: &str, mode: ChannelMode) {
    assert_eq!(name.parse::<ChannelMode>().unwrap(), mode);
    assert_eq!(mode.to_string(), name);
}

#[test]
fn unknown_mode_is_rejected() {
    let err = "SEARCH".parse::<ChannelMode>().unwrap_err();
    assert_eq!(err, WireError::UnknownMode("SEARCH".to_string()));
}

#[yare::parameterized(
    search_query     = { ChannelMode::Search,  Verb::Query,           true },
    search_suggest   = { ChannelMode::Search,  Verb::Suggest,         true },
    search_push      = { ChannelMode::Search,  Verb::Push,            false },
    ingest_push      = { ChannelMode::Ingest,  Verb::Push,            true },
    ingest_flushb    = { ChannelMode::Ingest,  Verb::FlushBucket,     true },
    ingest_query     = { ChannelMode::Ingest,  Verb::Query,           false },
    control_trigger  = { ChannelMode::Control, Verb::Trigger,         true },
    control_count    = { ChannelMode::Control, Verb::Count,           false },
    ping_everywhere  = { ChannelMode::Control, Verb::Ping,            true },
    help_everywhere  = { ChannelMode::Ingest,  Verb::Help,            true },
    quit_everywhere  = { ChannelMode::Search,  Verb::Quit,            true },
    start_never      = { ChannelMode::Search,  Verb::Start,           false },
)]
fn mode_permits(mode: ChannelMode, verb: Verb, allowed: bool) {
    assert_eq!(mode.permits(verb), allowed);
}

#[test]
fn only_query_and_suggest_are_deferred() {
    let deferred: Vec<Verb> = [
        Verb::Start,
        Verb::Ping,
        Verb::Help,
        Verb::Quit,
        Verb::Push,
        Verb::Pop,
        Verb::Count,
        Verb::FlushCollection,
        Verb::FlushBucket,
        Verb::FlushObject,
        Verb::Query,
        Verb::Suggest,
        Verb::Trigger,
    ]
    .into_iter()
    .filter(|v| v.reply_kind() == ReplyKind::Deferred)
    .collect();
    assert_eq!(deferred, vec![Verb::Query, Verb::Suggest]);
}

#[test]
fn flush_verbs_use_wire_names() {
    assert_eq!(Verb::FlushCollection.as_str(), "FLUSHC");
    assert_eq!(Verb::FlushBucket.as_str(), "FLUSHB");
    assert_eq!(Verb::FlushObject.as_str(), "FLUSHO");
}
