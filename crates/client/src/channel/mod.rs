// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel clients, one per mode.
//!
//! Each client owns one [`Connection`] and exposes only the commands legal
//! for its mode. Commands shared by all modes live on the [`Channel`] trait.

mod control;
mod ingest;
mod search;

pub use control::ControlChannel;
pub use ingest::IngestChannel;
pub use search::{QueryOptions, SearchChannel};

use sonar_wire::{Command, Response, Verb};

use crate::{ClientError, Connection, HandshakeResult};

/// Commands understood on every channel.
pub trait Channel {
    fn connection(&self) -> &Connection;

    fn connection_mut(&mut self) -> &mut Connection;

    /// Parameters negotiated when the channel opened.
    fn handshake(&self) -> &HandshakeResult {
        self.connection().handshake()
    }

    fn protocol_version(&self) -> u32 {
        self.handshake().protocol
    }

    /// Largest command line the server accepts, in bytes.
    fn buffer_size(&self) -> usize {
        self.handshake().buffer
    }

    fn is_open(&self) -> bool {
        self.connection().is_open()
    }

    fn ping(&mut self) -> Result<(), ClientError> {
        self.connection_mut().call_with(Command::new(Verb::Ping), |reply| {
            matches!(reply, Response::Pong).then_some(())
        })
    }

    /// Server help text, optionally for one manual (e.g. `commands`).
    fn help(&mut self, manual: Option<&str>) -> Result<String, ClientError> {
        if let Some(manual) = manual {
            identifier("manual", manual)?;
        }
        self.connection_mut().call_with(Command::new(Verb::Help).word_opt(manual), |reply| {
            match reply {
                Response::Ok(text) => Some(text.unwrap_or_default()),
                Response::Result(text) => Some(text),
                _ => None,
            }
        })
    }

    /// End the session and return the server's reason.
    ///
    /// The connection is closed whether or not `ENDED` arrives.
    fn quit(&mut self) -> Result<String, ClientError> {
        let connection = self.connection_mut();
        let reason = connection.call_with(Command::new(Verb::Quit), |reply| match reply {
            Response::Ended { reason } => Some(reason),
            _ => None,
        });
        connection.close();
        reason
    }

    /// End the session politely with `QUIT` when the connection is still
    /// open, then release it. Failures along the way are ignored.
    fn close(&mut self) {
        if self.is_open() {
            let _ = self.quit();
        }
        self.connection_mut().close();
    }
}

/// Reject empty identifiers before anything is sent.
pub(crate) fn identifier(what: &str, value: &str) -> Result<(), ClientError> {
    if value.is_empty() {
        return Err(ClientError::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Reject free text that is empty once trimmed.
pub(crate) fn text(what: &str, value: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidArgument(format!("{what} must not be blank")));
    }
    Ok(())
}

/// Numeric payload of a `RESULT <n>` or `OK <n>` reply.
pub(crate) fn count(reply: Response) -> Option<u64> {
    match reply {
        Response::Result(value) | Response::Ok(Some(value)) => value.trim().parse().ok(),
        _ => None,
    }
}

/// Results carried by an `EVENT`.
pub(crate) fn results(reply: Response) -> Option<Vec<String>> {
    match reply {
        Response::Event { results, .. } => Some(results),
        _ => None,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
