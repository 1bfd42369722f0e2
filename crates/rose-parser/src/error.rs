// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parse error types.

use rose_ast::{Pos, Position};
use rose_resolve::ResolveError;
use thiserror::Error;

/// Where a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Illegal character or malformed literal, reported by the lexer.
    Lexical,
    /// Unexpected or missing token.
    Syntax,
    /// Redeclaration, invalid declaration shape, or a non-type used as type.
    Semantic,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Lexical => "lexical",
            ErrorKind::Syntax => "syntax",
            ErrorKind::Semantic => "semantic",
        }
    }
}

/// A diagnostic recorded while parsing one source unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: {message}")]
pub struct ParseError {
    pub position: Position,
    pub pos: Pos,
    pub kind: ErrorKind,
    pub message: String,
    pub hint: Option<String>,
    /// The resolver error behind a redeclaration, with both positions.
    pub cause: Option<ResolveError>,
}

impl ParseError {
    pub fn new(position: Position, pos: Pos, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            position,
            pos,
            kind,
            message: message.into(),
            hint: None,
            cause: None,
        }
    }
}

/// Raised once too many diagnostics have been recorded; unwinds the parse
/// back to its entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("too many errors")]
pub struct Bailout;

pub type PResult<T> = Result<T, Bailout>;
