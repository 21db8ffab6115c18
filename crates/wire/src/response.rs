// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use crate::escape::{unescape, unquote};
use crate::line::{decode, parse_flag, Line};
use crate::{ChannelMode, WireError};

/// Server-chosen token tying a `PENDING` acknowledgment to its `EVENT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker(String);

impl Marker {
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Marker {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Which deferred command an `EVENT` answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Query,
    Suggest,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::Suggest => "SUGGEST",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "QUERY" => Some(Self::Query),
            "SUGGEST" => Some(Self::Suggest),
            _ => None,
        }
    }
}

/// Fields of a `STARTED <mode> protocol(<v>) buffer(<n>)` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Started {
    pub mode: ChannelMode,
    pub protocol: u32,
    pub buffer: usize,
}

/// A single reply line from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Unsolicited greeting sent on accept
    Connected { banner: String },

    /// Handshake accepted
    Started(Started),

    /// Generic success, optionally carrying free text (e.g. `HELP`)
    Ok(Option<String>),

    /// Reply to `PING`
    Pong,

    /// Success carrying a value (e.g. `COUNT`, `FLUSHC`)
    Result(String),

    /// Deferred command accepted; an `EVENT` with this marker follows
    Pending(Marker),

    /// Result of a deferred command
    Event { kind: EventKind, marker: Marker, results: Vec<String> },

    /// Server is closing the connection
    Ended { reason: String },

    /// Command rejected
    Err { reason: String },
}

impl Response {
    /// Parse one received line.
    pub fn parse(input: &str) -> Result<Self, WireError> {
        let line = decode(input)?;
        match line.verb.as_str() {
            "CONNECTED" => Ok(Self::Connected { banner: free_text(&line)? }),
            "STARTED" => parse_started(&line).map(Self::Started),
            "OK" => {
                let text = free_text(&line)?;
                Ok(Self::Ok((!text.is_empty()).then_some(text)))
            }
            "PONG" => Ok(Self::Pong),
            "RESULT" => match free_text(&line)? {
                value if value.is_empty() => {
                    Err(WireError::malformed(line.raw(), "RESULT without value"))
                }
                value => Ok(Self::Result(value)),
            },
            "PENDING" => match line.args.as_slice() {
                [marker] => Ok(Self::Pending(Marker::new(marker.as_str()))),
                _ => Err(WireError::malformed(line.raw(), "PENDING takes exactly one marker")),
            },
            "EVENT" => parse_event(&line),
            "ENDED" => Ok(Self::Ended { reason: free_text(&line)? }),
            "ERR" => Ok(Self::Err { reason: free_text(&line)? }),
            _ => Err(WireError::malformed(line.raw(), "unknown reply verb")),
        }
    }

    /// Short name of the reply, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "CONNECTED",
            Self::Started(_) => "STARTED",
            Self::Ok(_) => "OK",
            Self::Pong => "PONG",
            Self::Result(_) => "RESULT",
            Self::Pending(_) => "PENDING",
            Self::Event { .. } => "EVENT",
            Self::Ended { .. } => "ENDED",
            Self::Err { .. } => "ERR",
        }
    }
}

/// Unescaped remainder after the verb.
fn free_text(line: &Line) -> Result<String, WireError> {
    unescape(line.rest()).map_err(|e| WireError::malformed(line.raw(), e.to_string()))
}

fn parse_started(line: &Line) -> Result<Started, WireError> {
    let Some((mode, flags)) = line.args.split_first() else {
        return Err(WireError::malformed(line.raw(), "STARTED without mode"));
    };
    let mode: ChannelMode = mode.parse()?;

    let protocol = find_flag(line, flags, "protocol")?;
    let protocol = protocol
        .parse::<u32>()
        .map_err(|_| WireError::malformed(line.raw(), "protocol version is not a number"))?;

    let buffer = find_flag(line, flags, "buffer")?;
    let buffer = buffer
        .parse::<usize>()
        .map_err(|_| WireError::malformed(line.raw(), "buffer size is not a number"))?;

    Ok(Started { mode, protocol, buffer })
}

fn find_flag<'a>(line: &Line, flags: &'a [String], name: &str) -> Result<&'a str, WireError> {
    flags
        .iter()
        .find(|token| token.starts_with(name))
        .ok_or_else(|| WireError::malformed(line.raw(), format!("missing {name}(..)")))
        .and_then(|token| parse_flag(token, name))
}

fn parse_event(line: &Line) -> Result<Response, WireError> {
    let [kind, marker, results @ ..] = line.args.as_slice() else {
        return Err(WireError::malformed(line.raw(), "EVENT needs a kind and a marker"));
    };
    let Some(kind) = EventKind::parse(kind) else {
        return Err(WireError::malformed(line.raw(), "unknown EVENT kind"));
    };
    let results = results.iter().map(|token| unquote(token)).collect::<Result<Vec<_>, _>>()?;
    Ok(Response::Event { kind, marker: Marker::new(marker.as_str()), results })
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
