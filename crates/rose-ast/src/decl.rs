// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration AST nodes.

use std::fmt;

use crate::expr::{Expr, Ident};
use crate::span::Pos;
use crate::token::TokenKind;
use crate::{Node, NodeId};

/// A declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub id: NodeId,
    pub kind: DeclKind,
}

/// The kind of declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    /// Placeholder for a malformed declaration.
    Bad { from: Pos, to: Pos },
    Gen(GenDecl),
}

impl Decl {
    pub fn new(id: NodeId, kind: DeclKind) -> Self {
        Self { id, kind }
    }

    pub fn is_bad(&self) -> bool {
        matches!(self.kind, DeclKind::Bad { .. })
    }
}

/// A `const`, `let` or `var` declaration, either a single spec or a
/// parenthesized group. A valid `lparen` marks the grouped form.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub tok_pos: Pos,
    pub keyword: DeclKeyword,
    pub lparen: Pos,
    pub specs: Vec<ValueSpec>,
    pub rparen: Pos,
}

impl GenDecl {
    pub fn is_grouped(&self) -> bool {
        self.lparen.is_valid()
    }
}

/// The keyword introducing a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKeyword {
    Const,
    Let,
    Var,
}

impl DeclKeyword {
    pub fn from_token(kind: TokenKind) -> Option<DeclKeyword> {
        match kind {
            TokenKind::Const => Some(DeclKeyword::Const),
            TokenKind::Let => Some(DeclKeyword::Let),
            TokenKind::Var => Some(DeclKeyword::Var),
            _ => None,
        }
    }

    pub fn token(self) -> TokenKind {
        match self {
            DeclKeyword::Const => TokenKind::Const,
            DeclKeyword::Let => TokenKind::Let,
            DeclKeyword::Var => TokenKind::Var,
        }
    }
}

impl fmt::Display for DeclKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().as_str())
    }
}

/// One `names [type] [= values]` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub id: NodeId,
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

impl Node for ValueSpec {
    fn pos(&self) -> Pos {
        self.names.first().map_or(Pos::NONE, Node::pos)
    }

    fn end(&self) -> Pos {
        if let Some(last) = self.values.last() {
            return last.end();
        }
        if let Some(ty) = &self.ty {
            return ty.end();
        }
        self.names.last().map_or(Pos::NONE, Node::end)
    }
}

impl Node for Decl {
    fn pos(&self) -> Pos {
        match &self.kind {
            DeclKind::Bad { from, .. } => *from,
            DeclKind::Gen(g) => g.tok_pos,
        }
    }

    fn end(&self) -> Pos {
        match &self.kind {
            DeclKind::Bad { to, .. } => *to,
            DeclKind::Gen(g) if g.is_grouped() => g.rparen + 1,
            DeclKind::Gen(g) => g
                .specs
                .first()
                .map_or(g.tok_pos + g.keyword.token().as_str().len(), Node::end),
        }
    }
}
