// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return errors instead of calling `std::process::exit()`
//! directly; `main()` folds them into an `ExitError` and terminates.

use std::fmt;

use sonar_client::ClientError;

/// Server answered `ERR`, or anything not covered below.
pub const EXIT_FAILURE: i32 = 1;
/// Bad arguments or configuration; nothing was sent.
pub const EXIT_USAGE: i32 = 2;
/// Could not reach or authenticate with the server.
pub const EXIT_UNAVAILABLE: i32 = 3;
/// The connection broke during an exchange.
pub const EXIT_PROTOCOL: i32 = 4;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Fold any command error into an exit status.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ExitError>() {
            Ok(exit) => return exit,
            Err(err) => err,
        };
        match err.downcast::<ClientError>() {
            Ok(client) => Self::from(client),
            Err(other) => Self::new(EXIT_FAILURE, format!("{other:#}")),
        }
    }
}

impl From<ClientError> for ExitError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::Command { .. } => EXIT_FAILURE,
            ClientError::CommandNotAllowed { .. }
            | ClientError::InvalidArgument(_)
            | ClientError::Config(_) => EXIT_USAGE,
            ClientError::Connection { .. }
            | ClientError::Authentication(_)
            | ClientError::Handshake(_) => EXIT_UNAVAILABLE,
            ClientError::Write(_)
            | ClientError::ReadTimeout
            | ClientError::ConnectionClosed
            | ClientError::ProtocolViolation(_)
            | ClientError::Wire(_) => EXIT_PROTOCOL,
        };
        Self::new(code, err.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
