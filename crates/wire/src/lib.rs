// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line protocol for the search server's search, ingest and control channels.
//!
//! Wire format: one command or reply per `\n`-terminated line, arguments
//! separated by single spaces, reserved characters backslash-escaped.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod escape;
mod line;
mod mode;
mod response;

pub use error::WireError;
pub use escape::{escape, quote, unescape, unquote};
pub use line::{check_len, decode, encode, parse_flag, Arg, Command, Line, TERMINATOR};
pub use mode::{ChannelMode, ReplyKind, Verb};
pub use response::{EventKind, Marker, Response, Started};
