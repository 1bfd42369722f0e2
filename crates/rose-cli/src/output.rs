// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Human-readable rendering of front-end results.
//!
//! Colors follow NO_COLOR and FORCE_COLOR and are dropped when output is
//! piped.

use colored::{ColoredString, Colorize};
use rose_ast::token::{Token, TokenKind};
use rose_ast::Position;

pub fn init() {
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else if std::env::var("FORCE_COLOR").is_ok() {
        colored::control::set_override(true);
    }
}

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

/// `=== Tokens (12) ===`
pub fn section(title: &str, count: usize) -> String {
    format!("{} {} ({}) {}", "===".dimmed(), title, count, "===".dimmed())
}

/// Closing line of a phase: `=== Parse OK ===` or
/// `=== Parse FAILED: 2 errors ===`.
pub fn phase_result(phase: &str, errors: usize) -> String {
    let msg = match errors {
        0 => format!("{phase} OK").green().bold(),
        1 => format!("{phase} FAILED: 1 error").red().bold(),
        n => format!("{phase} FAILED: {n} errors").red().bold(),
    };
    format!("{} {} {}", "===".dimmed(), msg, "===".dimmed())
}

/// One token as `line:col kind text`. Inserted terminators show as
/// `newline` (or `EOF` at the end of input), explicit text is quoted.
pub fn token_line(position: &Position, tok: &Token<'_>) -> String {
    let text = match tok.kind {
        TokenKind::Semi if tok.is_implicit_semi() => {
            let why = if tok.lit.is_empty() { "EOF" } else { "newline" };
            why.dimmed().to_string()
        }
        TokenKind::Eof => String::new(),
        _ if tok.lit.is_empty() => tok.kind.as_str().to_string(),
        _ => format!("{:?}", tok.lit),
    };
    let kind = format!("{:?}", tok.kind);
    format!("{:>4}:{:<3} {:<12} {}", position.line, position.column, kind.cyan(), text)
}

/// A declared name: `var  a  main.rose:1:5`.
pub fn object_line(kind: &str, name: &str, position: &Position) -> String {
    format!("{:<6} {:<12} {}", kind.yellow(), name.bold(), position.to_string().dimmed())
}

/// A name no scope knows about.
pub fn unresolved_line(name: &str, position: &Position) -> String {
    format!("{:<12} {}", name.bold(), position.to_string().dimmed())
}
