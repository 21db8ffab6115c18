// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel modes and the command verbs legal in each.

use std::fmt;
use std::str::FromStr;

use crate::WireError;

/// Role a connection commits to in its `START` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    Search,
    Ingest,
    Control,
}

impl ChannelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Ingest => "ingest",
            Self::Control => "control",
        }
    }

    /// Whether `verb` may be sent on a connection started in this mode.
    pub fn permits(&self, verb: Verb) -> bool {
        match verb {
            Verb::Start => false,
            Verb::Ping | Verb::Help | Verb::Quit => true,
            Verb::Query | Verb::Suggest => *self == Self::Search,
            Verb::Push
            | Verb::Pop
            | Verb::Count
            | Verb::FlushCollection
            | Verb::FlushBucket
            | Verb::FlushObject => *self == Self::Ingest,
            Verb::Trigger => *self == Self::Control,
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelMode {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(Self::Search),
            "ingest" => Ok(Self::Ingest),
            "control" => Ok(Self::Control),
            other => Err(WireError::UnknownMode(other.to_string())),
        }
    }
}

/// How the server answers a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Exactly one acknowledgment line (`OK`, `PONG`, `RESULT`, `ENDED`, `ERR`).
    Immediate,
    /// `PENDING <marker>` followed by `EVENT <kind> <marker> ...`.
    Deferred,
}

/// Command verbs understood by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Start,
    Ping,
    Help,
    Quit,
    Push,
    Pop,
    Count,
    FlushCollection,
    FlushBucket,
    FlushObject,
    Query,
    Suggest,
    Trigger,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Ping => "PING",
            Self::Help => "HELP",
            Self::Quit => "QUIT",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Count => "COUNT",
            Self::FlushCollection => "FLUSHC",
            Self::FlushBucket => "FLUSHB",
            Self::FlushObject => "FLUSHO",
            Self::Query => "QUERY",
            Self::Suggest => "SUGGEST",
            Self::Trigger => "TRIGGER",
        }
    }

    pub fn reply_kind(&self) -> ReplyKind {
        match self {
            Self::Query | Self::Suggest => ReplyKind::Deferred,
            _ => ReplyKind::Immediate,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
