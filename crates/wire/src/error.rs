// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for line encoding and reply parsing.

use thiserror::Error;

/// Errors produced while escaping, framing or parsing protocol lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The line could not be split into a verb and arguments, or a reply
    /// did not have the shape its verb requires.
    #[error("malformed line {line:?}: {reason}")]
    MalformedLine {
        /// The offending line, without its terminator.
        line: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A backslash followed by a character with no defined escape.
    #[error("invalid escape sequence '\\{ch}' at position {position}")]
    InvalidEscape {
        /// The character after the backslash.
        ch: char,
        /// Byte offset of the backslash.
        position: usize,
    },

    /// Input ended with a lone backslash.
    #[error("trailing backslash at position {position}")]
    TrailingBackslash {
        /// Byte offset of the backslash.
        position: usize,
    },

    /// The encoded command does not fit the negotiated buffer.
    #[error("command is {len} bytes, server buffer is {max} bytes")]
    CommandTooLarge { len: usize, max: usize },

    /// Channel mode name not one of search, ingest or control.
    #[error("unknown channel mode '{0}'")]
    UnknownMode(String),

    /// A `name(value)` token was missing or unparseable.
    #[error("invalid {name}(..) flag in {token:?}")]
    InvalidFlag { name: String, token: String },
}

impl WireError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        Self::MalformedLine { line: line.to_string(), reason: reason.into() }
    }
}
