// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resolution error types.

use rose_ast::Pos;
use thiserror::Error;

/// A name resolution error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub pos: Pos,
}

impl ResolveError {
    pub fn redeclared(name: String, pos: Pos, previous: Pos) -> Self {
        Self {
            kind: ResolveErrorKind::Redeclared { name, previous },
            pos,
        }
    }

    /// Position of the earlier declaration, if the error refers to one.
    pub fn previous(&self) -> Option<Pos> {
        match &self.kind {
            ResolveErrorKind::Redeclared { previous, .. } => previous.is_valid().then_some(*previous),
        }
    }
}

/// The kind of resolution error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveErrorKind {
    #[error("{name} redeclared in this block")]
    Redeclared { name: String, previous: Pos },
}
