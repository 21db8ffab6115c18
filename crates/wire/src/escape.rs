// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backslash escaping of reserved characters.
//!
//! | raw     | escaped  |
//! |---------|----------|
//! | `\`     | `\\`     |
//! | space   | `\ `     |
//! | LF      | `\n`     |
//! | CR      | `\r`     |
//! | `"`     | `\"`     |

use crate::WireError;

/// Escape every reserved character in `text`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ' ' => out.push_str("\\ "),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

/// Exact inverse of [`escape`].
pub fn unescape(text: &str) -> Result<String, WireError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();
    while let Some((pos, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            return Err(WireError::TrailingBackslash { position: pos });
        };
        let replacement = match esc {
            '\\' => '\\',
            ' ' => ' ',
            'n' => '\n',
            'r' => '\r',
            '"' => '"',
            _ => return Err(WireError::InvalidEscape { ch: esc, position: pos }),
        };
        out.push(replacement);
    }
    Ok(out)
}

/// Escape free text and wrap it in double quotes.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape(text))
}

/// Strip the surrounding quotes from a token produced by [`quote`] and
/// unescape it. Unquoted tokens are only unescaped.
pub fn unquote(token: &str) -> Result<String, WireError> {
    match token.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(inner) if !ends_escaped(inner) => unescape(inner),
        _ => unescape(token),
    }
}

/// True when `s` ends in an odd run of backslashes, i.e. the character
/// following it would be escaped.
pub(crate) fn ends_escaped(s: &str) -> bool {
    s.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
