// Coloured console output for seeding progress.
// Each line carries a symbol prefix (✓ ✗ ℹ !) so the output stays readable
// when piped and colours are dropped. Errors go to stderr.

use crossterm::style::{Color, Stylize};
use std::io::{IsTerminal, Write};

fn styled(symbol: &str, msg: impl std::fmt::Display, color: Color, colored: bool) -> String {
    let line = format!("{symbol} {msg}");
    if colored {
        line.with(color).to_string()
    } else {
        line
    }
}

fn to_stdout(line: String) {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{line}").ok();
}

/// Print a success message (green checkmark prefix).
pub fn success(msg: impl std::fmt::Display) {
    let colored = std::io::stdout().is_terminal();
    to_stdout(styled("✓", msg, Color::Green, colored));
}

/// Print an error message to stderr (red X prefix).
pub fn error(msg: impl std::fmt::Display) {
    let colored = std::io::stderr().is_terminal();
    let mut out = std::io::stderr().lock();
    writeln!(out, "{}", styled("✗", msg, Color::Red, colored)).ok();
}

/// Print an informational message (blue prefix).
pub fn info(msg: impl std::fmt::Display) {
    let colored = std::io::stdout().is_terminal();
    to_stdout(styled("ℹ", msg, Color::Blue, colored));
}

/// Print a warning message (yellow exclamation prefix).
pub fn warning(msg: impl std::fmt::Display) {
    let colored = std::io::stdout().is_terminal();
    to_stdout(styled("!", msg, Color::Yellow, colored));
}
