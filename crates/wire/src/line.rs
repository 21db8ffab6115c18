// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line framing: commands out, verb/argument splitting in.

use crate::escape::{escape, quote};
use crate::{Verb, WireError};

/// Line terminator appended to every command.
pub const TERMINATOR: char = '\n';

/// A single command argument.
///
/// Values are held unescaped; escaping happens once, in [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Identifier such as a collection, bucket, object or action.
    Word(String),
    /// Free text, sent quoted.
    Text(String),
    /// Modifier sent as `NAME(value)`, e.g. `LIMIT(10)`.
    Flag { name: &'static str, value: String },
}

impl Arg {
    fn encode_into(&self, out: &mut String) {
        match self {
            Arg::Word(word) => out.push_str(&escape(word)),
            Arg::Text(text) => out.push_str(&quote(text)),
            Arg::Flag { name, value } => {
                out.push_str(name);
                out.push('(');
                out.push_str(&escape(value));
                out.push(')');
            }
        }
    }
}

/// An outgoing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub args: Vec<Arg>,
}

impl Command {
    pub fn new(verb: Verb) -> Self {
        Self { verb, args: Vec::new() }
    }

    pub fn word(mut self, word: impl Into<String>) -> Self {
        self.args.push(Arg::Word(word.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.args.push(Arg::Text(text.into()));
        self
    }

    pub fn flag(mut self, name: &'static str, value: impl ToString) -> Self {
        self.args.push(Arg::Flag { name, value: value.to_string() });
        self
    }

    /// Append a word only when present.
    pub fn word_opt(self, word: Option<impl Into<String>>) -> Self {
        match word {
            Some(word) => self.word(word),
            None => self,
        }
    }

    /// Append a flag only when present.
    pub fn flag_opt(self, name: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.flag(name, value),
            None => self,
        }
    }
}

/// Encode a command as a terminated line.
pub fn encode(command: &Command) -> String {
    let mut out = String::from(command.verb.as_str());
    for arg in &command.args {
        out.push(' ');
        arg.encode_into(&mut out);
    }
    out.push(TERMINATOR);
    out
}

/// Check an encoded line against the server's buffer size.
///
/// The terminator does not count towards the limit.
pub fn check_len(encoded: &str, max: usize) -> Result<(), WireError> {
    let len = encoded.trim_end_matches(['\r', '\n']).len();
    if len > max {
        return Err(WireError::CommandTooLarge { len, max });
    }
    Ok(())
}

/// A received line split into its verb and still-escaped argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub verb: String,
    pub args: Vec<String>,
    raw: String,
}

impl Line {
    /// The line as received, minus its terminator.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Everything after the verb, unsplit. Used for free-form reasons and banners.
    pub fn rest(&self) -> &str {
        self.raw[self.verb.len()..].trim_start_matches(' ')
    }
}

/// Split a received line on unescaped spaces.
pub fn decode(line: &str) -> Result<Line, WireError> {
    let raw = line.strip_suffix(TERMINATOR).unwrap_or(line);
    let raw = raw.strip_suffix('\r').unwrap_or(raw);

    let mut tokens = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (pos, ch) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            ' ' => {
                if pos > start {
                    tokens.push(&raw[start..pos]);
                }
                start = pos + 1;
            }
            _ => {}
        }
    }
    if start < raw.len() {
        tokens.push(&raw[start..]);
    }

    let mut tokens = tokens.into_iter();
    let Some(verb) = tokens.next() else {
        return Err(WireError::malformed(raw, "no verb"));
    };
    if raw.starts_with(' ') {
        return Err(WireError::malformed(raw, "leading space before verb"));
    }

    Ok(Line {
        verb: verb.to_string(),
        args: tokens.map(str::to_string).collect(),
        raw: raw.to_string(),
    })
}

/// Extract the value of a `name(value)` token.
pub fn parse_flag<'a>(token: &'a str, name: &str) -> Result<&'a str, WireError> {
    token
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| WireError::InvalidFlag { name: name.to_string(), token: token.to_string() })
}

#[cfg(test)]
#[path = "line_tests.rs"]
mod tests;
