// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod control;
pub mod ingest;
pub mod search;
pub mod server;

use anyhow::Result;
use sonar_client::Channel;

/// Run `f` against an open channel, then end the session with `QUIT`.
///
/// The channel is closed whether `f` succeeds or not.
pub(crate) fn session<C, T>(channel: &mut C, f: impl FnOnce(&mut C) -> Result<T>) -> Result<T>
where
    C: Channel + ?Sized,
{
    let result = f(channel);
    channel.close();
    result
}
