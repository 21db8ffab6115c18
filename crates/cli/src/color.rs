// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for help text and command output.

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

/// ANSI 256-color codes.
pub mod codes {
    /// Help headers and reply verbs: steel blue
    pub const HEADER: u8 = 74;
    /// Help placeholders such as `<COLLECTION>`: medium grey
    pub const PLACEHOLDER: u8 = 245;
    /// Empty results and other secondary text: darker grey
    pub const MUTED: u8 = 240;
}

/// `NO_COLOR=1` disables, `COLOR=1` forces, otherwise color when stdout is a TTY.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// clap help styles.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled().header(fg(codes::HEADER)).placeholder(fg(codes::PLACEHOLDER))
}

fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

fn paint(code: u8, text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    let style = fg(code);
    format!("{style}{text}{style:#}")
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
