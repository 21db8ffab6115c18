// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `CONNECTED` / `START` / `STARTED` negotiation.
//!
//! ```text
//! Unconnected ──CONNECTED──▶ Connected ──STARTED──▶ Authenticated ──▶ Closed
//!      │                         │
//!      └─────────────────────────┴──(anything else)──▶ Failed
//! ```
//!
//! `Failed` is terminal; retrying needs a new connection.

use std::time::Duration;

use sonar_wire::{encode, ChannelMode, Command, Response, Verb};
use tracing::{debug, warn};

use crate::{ClientError, Transport};

/// Parameters fixed by a successful handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeResult {
    pub mode: ChannelMode,
    pub protocol: u32,
    /// Largest command line the server accepts, in bytes.
    pub buffer: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    Unconnected,
    Connected,
    Authenticated,
    Closed,
    Failed,
}

pub struct HandshakeNegotiator {
    mode: ChannelMode,
    state: HandshakeState,
    banner: Option<String>,
}

impl HandshakeNegotiator {
    pub fn new(mode: ChannelMode) -> Self {
        Self { mode, state: HandshakeState::Unconnected, banner: None }
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Server greeting, once received.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Run the exchange once. On any failure the transport is closed and
    /// the negotiator ends in `Failed`.
    pub fn negotiate(
        &mut self,
        transport: &mut Transport,
        password: &str,
        timeout: Duration,
    ) -> Result<HandshakeResult, ClientError> {
        if self.state != HandshakeState::Unconnected {
            return Err(ClientError::Handshake(format!(
                "negotiation already ran (state {:?})",
                self.state
            )));
        }

        match self.run(transport, password, timeout) {
            Ok(result) => {
                self.state = HandshakeState::Authenticated;
                debug!(
                    mode = %result.mode,
                    protocol = result.protocol,
                    buffer = result.buffer,
                    "handshake complete"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(peer = transport.peer(), error = %e, "handshake failed, closing");
                transport.close();
                self.state = HandshakeState::Failed;
                Err(e)
            }
        }
    }

    /// Record that the connection this handshake belongs to was closed.
    pub fn mark_closed(&mut self) {
        if self.state == HandshakeState::Authenticated {
            self.state = HandshakeState::Closed;
        }
    }

    fn run(
        &mut self,
        transport: &mut Transport,
        password: &str,
        timeout: Duration,
    ) -> Result<HandshakeResult, ClientError> {
        if password.is_empty() {
            return Err(ClientError::InvalidArgument("password must not be empty".to_string()));
        }

        let greeting = transport
            .receive_line(timeout)
            .map_err(|e| ClientError::Handshake(format!("no CONNECTED greeting: {e}")))?;
        match Response::parse(&greeting) {
            Ok(Response::Connected { banner }) => {
                debug!(%banner, "server greeting");
                self.banner = Some(banner);
                self.state = HandshakeState::Connected;
            }
            Ok(other) => {
                return Err(ClientError::Handshake(format!(
                    "expected CONNECTED, got {}",
                    other.name()
                )))
            }
            Err(e) => return Err(ClientError::Handshake(e.to_string())),
        }

        let start = Command::new(Verb::Start).word(self.mode.as_str()).word(password);
        transport.send_line(&encode(&start))?;

        let reply = transport.receive_line(timeout)?;
        match Response::parse(&reply) {
            Ok(Response::Started(started)) if started.mode == self.mode => Ok(HandshakeResult {
                mode: started.mode,
                protocol: started.protocol,
                buffer: started.buffer,
            }),
            Ok(Response::Started(started)) => Err(ClientError::Handshake(format!(
                "asked for {} channel, server started {}",
                self.mode, started.mode
            ))),
            Ok(Response::Ended { reason }) | Ok(Response::Err { reason }) => {
                Err(ClientError::Authentication(reason))
            }
            Ok(other) => {
                Err(ClientError::Handshake(format!("expected STARTED, got {}", other.name())))
            }
            Err(e) => Err(ClientError::Handshake(e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "handshake_tests.rs"]
mod tests;
