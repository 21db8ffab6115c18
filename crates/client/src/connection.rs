// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One authenticated connection committed to a channel mode.

use std::time::Duration;

use sonar_wire::{check_len, encode, ChannelMode, Command, Response, Verb};
use tracing::warn;

use crate::correlator::Correlator;
use crate::{
    ClientConfig, ClientError, HandshakeNegotiator, HandshakeResult, HandshakeState, Transport,
};

/// A transport that has completed the handshake.
///
/// Every command takes `&mut self` and blocks until its terminal reply, so
/// at most one command is ever in flight. Fatal errors close the
/// connection; later calls fail fast with [`ClientError::ConnectionClosed`].
pub struct Connection {
    transport: Transport,
    negotiator: HandshakeNegotiator,
    handshake: HandshakeResult,
    read_timeout: Duration,
}

impl Connection {
    /// Connect and run the handshake for `mode`.
    pub fn open(config: &ClientConfig, mode: ChannelMode) -> Result<Self, ClientError> {
        let mut transport = Transport::connect(&config.host, config.port, config.timeouts)?;
        let mut negotiator = HandshakeNegotiator::new(mode);
        let handshake =
            negotiator.negotiate(&mut transport, &config.password, config.timeouts.read)?;
        Ok(Self { transport, negotiator, handshake, read_timeout: config.timeouts.read })
    }

    pub fn mode(&self) -> ChannelMode {
        self.handshake.mode
    }

    pub fn handshake(&self) -> &HandshakeResult {
        &self.handshake
    }

    pub fn state(&self) -> HandshakeState {
        self.negotiator.state()
    }

    pub fn banner(&self) -> Option<&str> {
        self.negotiator.banner()
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Send one command and wait for its terminal reply.
    ///
    /// Mode and length checks run before anything is written.
    pub fn call(&mut self, command: Command) -> Result<Response, ClientError> {
        if !self.transport.is_open() {
            return Err(ClientError::ConnectionClosed);
        }
        let mode = self.mode();
        if !mode.permits(command.verb) {
            return Err(ClientError::CommandNotAllowed { verb: command.verb, mode });
        }
        let line = encode(&command);
        check_len(&line, self.handshake.buffer)?;

        let result = self.exchange(command.verb, &line);
        if let Err(e) = &result {
            self.fail(command.verb, e);
        }
        result
    }

    /// Like [`call`](Self::call), then pull a value out of the reply.
    ///
    /// A reply `extract` cannot use is a protocol violation.
    pub fn call_with<T>(
        &mut self,
        command: Command,
        extract: impl FnOnce(Response) -> Option<T>,
    ) -> Result<T, ClientError> {
        let verb = command.verb;
        let response = self.call(command)?;
        let name = response.name();
        extract(response).ok_or_else(|| {
            let err = ClientError::violation(format!("unusable {name} reply to {verb}"));
            self.fail(verb, &err);
            err
        })
    }

    /// Release the socket. Safe to call more than once.
    pub fn close(&mut self) {
        self.transport.close();
        self.negotiator.mark_closed();
    }

    fn exchange(&mut self, verb: Verb, line: &str) -> Result<Response, ClientError> {
        self.transport.send_line(line)?;
        Correlator::new(verb, self.read_timeout).resolve(&mut self.transport)
    }

    fn fail(&mut self, verb: Verb, err: &ClientError) {
        if err.is_fatal() {
            warn!(peer = self.transport.peer(), %verb, error = %err, "closing connection");
            self.close();
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
