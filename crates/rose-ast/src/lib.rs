// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Rose language.
//!
//! This crate defines the position table, the token catalog and the AST
//! nodes shared between the lexer, the resolver and the parser.

pub mod span;
pub mod source;
pub mod token;
pub mod expr;
pub mod stmt;
pub mod decl;
pub mod printer;

pub use span::{LineMap, Pos, Span};
pub use source::{FileSet, Position, SourceError, SourceFile};
pub use expr::unparen;
pub use printer::ToSexp;

/// Unique identifier for AST nodes.
///
/// Objects refer back to their declaring node through this handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const DUMMY: NodeId = NodeId(u32::MAX);
}

/// Handle of a declared object in the resolver's object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Implemented by every node: where it starts and where it ends.
pub trait Node {
    /// Position of the first character belonging to the node.
    fn pos(&self) -> Pos;

    /// Position of the first character immediately after the node.
    fn end(&self) -> Pos;

    fn span(&self) -> Span {
        Span::new(self.pos(), self.end())
    }
}

/// The root of a parsed source unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct File {
    /// Top-level statements.
    pub stmts: Vec<stmt::Stmt>,
    /// Identifier references that found no binding in any open scope.
    pub unresolved: Vec<expr::Ident>,
}

impl File {
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

impl Node for File {
    fn pos(&self) -> Pos {
        self.stmts.first().map_or(Pos::NONE, Node::pos)
    }

    fn end(&self) -> Pos {
        self.stmts.last().map_or(Pos::NONE, Node::end)
    }
}
