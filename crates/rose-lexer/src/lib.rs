// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for the Rose language.
//!
//! Turns source text into tokens on demand, inserting implicit statement
//! terminators at line ends.

mod cursor;
mod lexer;
mod literal;

pub use lexer::{LexError, LexResult, Lexer};

#[cfg(test)]
mod property_tests;
