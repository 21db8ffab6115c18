// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sonar-client: blocking client for the search server's channels

pub mod channel;
pub mod config;
pub mod connection;
pub mod correlator;
pub mod env;
pub mod error;
pub mod handshake;
pub mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use channel::{Channel, ControlChannel, IngestChannel, QueryOptions, SearchChannel};
pub use config::ClientConfig;
pub use connection::Connection;
pub use correlator::{Correlator, Exchange};
pub use error::ClientError;
pub use handshake::{HandshakeNegotiator, HandshakeResult, HandshakeState};
pub use transport::{Timeouts, Transport};

// Wire types that appear in this crate's public API
pub use sonar_wire::{ChannelMode, Verb};
