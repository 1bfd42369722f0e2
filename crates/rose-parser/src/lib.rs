// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Rose language.
//!
//! Pulls tokens from the lexer one at a time and builds the syntax tree,
//! resolving identifiers against the enclosing scopes as it goes. Malformed
//! input never aborts the parse on its own: errors are recorded and the
//! parser resynchronizes at the next statement.

mod error;
mod expr;
mod hints;
mod parser;
mod stmt;

pub use error::{Bailout, ErrorKind, PResult, ParseError};
pub use expr::BUILTIN_TYPES;
pub use parser::Parser;

use rose_ast::{File, FileSet, Pos, Position, SourceError, SourceFile};
use rose_resolve::{ObjectTable, ScopeTree};

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Report every error: no per-line filtering and no error cap.
    pub all_errors: bool,
}

/// Result of parsing one source unit.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub file: File,
    /// Every object declared while parsing, indexed by `ObjectId`.
    pub objects: ObjectTable,
    pub scopes: ScopeTree,
    /// Diagnostics sorted by position.
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// An empty result carrying the reason the source was never parsed.
    fn rejected(err: SourceError) -> Self {
        let message = err.to_string();
        ParseResult {
            file: File::default(),
            objects: ObjectTable::default(),
            scopes: ScopeTree::default(),
            errors: vec![ParseError::new(Position::default(), Pos::NONE, ErrorKind::Lexical, message)],
        }
    }
}

/// Register `source` in `fset` under `filename` and parse it.
pub fn parse_file(
    fset: &mut FileSet,
    filename: &str,
    source: &str,
    options: ParseOptions,
) -> Result<ParseResult, SourceError> {
    let file = fset.add_file(filename, source)?;
    Ok(Parser::new(&file, source, options).parse_file())
}

/// Parse an anonymous source unit with default options.
pub fn parse(source: &str) -> ParseResult {
    parse_with(source, ParseOptions::default())
}

/// Like [`parse`]; a source too large to address comes back as a single
/// error and an empty tree.
pub fn parse_with(source: &str, options: ParseOptions) -> ParseResult {
    match SourceFile::new("", 1, source) {
        Ok(file) => Parser::new(&file, source, options).parse_file(),
        Err(err) => ParseResult::rejected(err),
    }
}

#[cfg(test)]
mod property_tests;
