// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reply correlation for one in-flight command.
//!
//! Immediate verbs resolve on the first line. Deferred verbs (`QUERY`,
//! `SUGGEST`) walk an explicit state machine:
//!
//! ```text
//! Sent ──PENDING m──▶ Pending(m) ──EVENT kind m ...──▶ Resolved
//!   │                     │
//!   └──── anything else ──┴──────────────────────────▶ Violated
//! ```
//!
//! The wire is not pipelined, so the line after `PENDING` must be the
//! matching `EVENT`. Nothing is skipped: an unmatched line is a violation.

use std::time::{Duration, Instant};

use sonar_wire::{EventKind, Marker, ReplyKind, Response, Verb};

use crate::{ClientError, Transport};

/// Where an exchange stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// Command written, nothing read yet.
    Sent,
    /// `PENDING` received; waiting on the event for this marker.
    Pending(Marker),
    /// Terminal reply obtained (success or `ERR`).
    Resolved,
    /// The server broke the exchange; the connection cannot be trusted.
    Violated,
}

pub struct Correlator {
    verb: Verb,
    state: Exchange,
    deadline: Instant,
}

impl Correlator {
    /// Start correlating replies to `verb`, which has just been sent.
    pub fn new(verb: Verb, timeout: Duration) -> Self {
        Self { verb, state: Exchange::Sent, deadline: Instant::now() + timeout }
    }

    pub fn state(&self) -> &Exchange {
        &self.state
    }

    /// Read lines until the exchange reaches a terminal state.
    ///
    /// Returns the acknowledgment for immediate verbs (`OK`, `PONG`,
    /// `RESULT`, or `ENDED` for `QUIT`) and the `EVENT` for deferred verbs.
    pub fn resolve(&mut self, transport: &mut Transport) -> Result<Response, ClientError> {
        loop {
            let Some(remaining) = self.deadline.checked_duration_since(Instant::now()) else {
                return Err(ClientError::ReadTimeout);
            };
            let line = transport.receive_line(remaining)?;
            let response = match Response::parse(&line) {
                Ok(response) => response,
                Err(e) => {
                    self.state = Exchange::Violated;
                    return Err(ClientError::violation(e.to_string()));
                }
            };
            if let Some(done) = self.step(response)? {
                return Ok(done);
            }
        }
    }

    /// Advance on one parsed reply. `Ok(None)` means keep reading.
    pub fn step(&mut self, response: Response) -> Result<Option<Response>, ClientError> {
        let state = std::mem::replace(&mut self.state, Exchange::Violated);
        match (state, self.verb.reply_kind()) {
            (Exchange::Sent, ReplyKind::Immediate) => match response {
                Response::Ok(_) | Response::Pong | Response::Result(_) => self.resolved(response),
                Response::Ended { .. } if self.verb == Verb::Quit => self.resolved(response),
                Response::Err { reason } => self.rejected(reason),
                other => Err(self.unexpected(&other)),
            },
            (Exchange::Sent, ReplyKind::Deferred) => match response {
                Response::Pending(marker) => {
                    self.state = Exchange::Pending(marker);
                    Ok(None)
                }
                Response::Err { reason } => self.rejected(reason),
                other => Err(self.unexpected(&other)),
            },
            (Exchange::Pending(expected), _) => match response {
                Response::Event { kind, marker, .. } if marker != expected => {
                    Err(ClientError::violation(format!(
                        "EVENT {} for marker {marker} while waiting on {expected}",
                        kind.as_str()
                    )))
                }
                Response::Event { kind, .. } if Some(kind) != event_kind(self.verb) => {
                    Err(ClientError::violation(format!(
                        "EVENT {} does not answer {}",
                        kind.as_str(),
                        self.verb
                    )))
                }
                Response::Event { .. } => self.resolved(response),
                other => Err(ClientError::violation(format!(
                    "expected EVENT for marker {expected}, got {}",
                    other.name()
                ))),
            },
            (finished @ (Exchange::Resolved | Exchange::Violated), _) => {
                self.state = finished;
                Err(ClientError::violation(format!(
                    "{} reply after {} exchange finished",
                    response.name(),
                    self.verb
                )))
            }
        }
    }

    fn resolved(&mut self, response: Response) -> Result<Option<Response>, ClientError> {
        self.state = Exchange::Resolved;
        Ok(Some(response))
    }

    fn rejected(&mut self, reason: String) -> Result<Option<Response>, ClientError> {
        self.state = Exchange::Resolved;
        Err(ClientError::Command { verb: self.verb, reason })
    }

    fn unexpected(&self, response: &Response) -> ClientError {
        ClientError::violation(format!("unexpected {} reply to {}", response.name(), self.verb))
    }
}

fn event_kind(verb: Verb) -> Option<EventKind> {
    match verb {
        Verb::Query => Some(EventKind::Query),
        Verb::Suggest => Some(EventKind::Suggest),
        _ => None,
    }
}

#[cfg(test)]
#[path = "correlator_tests.rs"]
mod tests;
