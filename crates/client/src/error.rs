// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client error taxonomy.

use std::io;

use sonar_wire::{ChannelMode, Verb, WireError};
use thiserror::Error;

/// Errors from connecting to the server or running a command on it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The socket could not be established.
    #[error("cannot connect to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The server refused the password at `START`.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The handshake did not follow the expected exchange.
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// Writing a line failed.
    #[error("failed to write to server: {0}")]
    Write(#[source] io::Error),

    /// No complete line arrived before the deadline.
    #[error("timed out waiting for server reply")]
    ReadTimeout,

    /// The connection is closed, by the server or after an earlier failure.
    #[error("connection closed")]
    ConnectionClosed,

    /// The server sent something the exchange does not allow.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// The server answered `ERR <reason>`.
    #[error("{verb} rejected: {reason}")]
    Command { verb: Verb, reason: String },

    /// The verb is not legal on this channel.
    #[error("{verb} is not allowed on the {mode} channel")]
    CommandNotAllowed { verb: Verb, mode: ChannelMode },

    /// An argument failed validation before anything was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Escaping, framing or length check failed.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// Configuration could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether this error leaves the connection unusable.
    ///
    /// Fatal errors close the connection before they reach the caller.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Connection { .. }
            | Self::Authentication(_)
            | Self::Handshake(_)
            | Self::Write(_)
            | Self::ReadTimeout
            | Self::ConnectionClosed
            | Self::ProtocolViolation(_) => true,
            Self::Wire(WireError::CommandTooLarge { .. }) => false,
            Self::Wire(_) => true,
            Self::Command { .. }
            | Self::CommandNotAllowed { .. }
            | Self::InvalidArgument(_)
            | Self::Config(_) => false,
        }
    }

    pub(crate) fn violation(message: impl Into<String>) -> Self {
        Self::ProtocolViolation(message.into())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
