// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use sonar_wire::{ChannelMode, Command, Response, Verb};

use super::{identifier, Channel};
use crate::{ClientConfig, ClientError, Connection};

/// Client for the control channel: server-side maintenance actions.
pub struct ControlChannel {
    connection: Connection,
}

impl ControlChannel {
    pub fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        Connection::open(config, ChannelMode::Control).map(|connection| Self { connection })
    }

    /// `TRIGGER <action> [<data>]`
    pub fn trigger(&mut self, action: &str, data: Option<&str>) -> Result<(), ClientError> {
        identifier("action", action)?;
        if let Some(data) = data {
            identifier("data", data)?;
        }
        let command = Command::new(Verb::Trigger).word(action).word_opt(data);
        self.connection.call_with(command, |reply| matches!(reply, Response::Ok(_)).then_some(()))
    }

    /// Flush pending index writes to disk.
    pub fn consolidate(&mut self) -> Result<(), ClientError> {
        self.trigger("consolidate", None)
    }

    pub fn backup(&mut self, path: &str) -> Result<(), ClientError> {
        self.trigger("backup", Some(path))
    }

    pub fn restore(&mut self, path: &str) -> Result<(), ClientError> {
        self.trigger("restore", Some(path))
    }
}

impl Channel for ControlChannel {
    fn connection(&self) -> &Connection {
        &self.connection
    }

    fn connection_mut(&mut self) -> &mut Connection {
        &mut self.connection
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
