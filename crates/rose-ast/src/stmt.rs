// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement AST nodes.

use crate::decl::Decl;
use crate::expr::Expr;
use crate::span::Pos;
use crate::token::TokenKind;
use crate::{Node, NodeId};

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
}

/// The kind of statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Placeholder for a malformed statement.
    Bad { from: Pos, to: Pos },
    /// Declaration in statement position
    Decl(Decl),
    /// Empty statement. `semi` is the position of the following terminator.
    Empty { semi: Pos, implicit: bool },
    /// Stand-alone expression
    Expr(Expr),
    /// `x++` or `x--`
    IncDec { expr: Expr, tok_pos: Pos, inc: bool },
    /// Assignment, simple or compound
    Assign {
        lhs: Vec<Expr>,
        tok_pos: Pos,
        op: AssignOp,
        rhs: Vec<Expr>,
    },
}

impl Stmt {
    pub fn new(id: NodeId, kind: StmtKind) -> Self {
        Self { id, kind }
    }

    pub fn is_bad(&self) -> bool {
        matches!(self.kind, StmtKind::Bad { .. })
    }
}

impl Node for Stmt {
    fn pos(&self) -> Pos {
        match &self.kind {
            StmtKind::Bad { from, .. } => *from,
            StmtKind::Decl(decl) => decl.pos(),
            StmtKind::Empty { semi, .. } => *semi,
            StmtKind::Expr(expr) => expr.pos(),
            StmtKind::IncDec { expr, .. } => expr.pos(),
            StmtKind::Assign { lhs, tok_pos, .. } => lhs.first().map_or(*tok_pos, Node::pos),
        }
    }

    fn end(&self) -> Pos {
        match &self.kind {
            StmtKind::Bad { to, .. } => *to,
            StmtKind::Decl(decl) => decl.end(),
            StmtKind::Empty { semi, implicit } => {
                if *implicit {
                    *semi
                } else {
                    *semi + 1
                }
            }
            StmtKind::Expr(expr) => expr.end(),
            StmtKind::IncDec { tok_pos, .. } => *tok_pos + 2,
            StmtKind::Assign { rhs, tok_pos, op, .. } => rhs
                .last()
                .map_or(*tok_pos + op.as_str().len(), Node::end),
        }
    }
}

/// Assignment operators: `=` and the compound forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Exp,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    BitAndNot,
}

impl AssignOp {
    pub fn from_token(kind: TokenKind) -> Option<AssignOp> {
        Some(match kind {
            TokenKind::Assign => AssignOp::Assign,
            TokenKind::AddAssign => AssignOp::Add,
            TokenKind::SubAssign => AssignOp::Sub,
            TokenKind::MulAssign => AssignOp::Mul,
            TokenKind::QuoAssign => AssignOp::Div,
            TokenKind::RemAssign => AssignOp::Rem,
            TokenKind::ExpAssign => AssignOp::Exp,
            TokenKind::AndAssign => AssignOp::BitAnd,
            TokenKind::OrAssign => AssignOp::BitOr,
            TokenKind::XorAssign => AssignOp::BitXor,
            TokenKind::ShlAssign => AssignOp::Shl,
            TokenKind::ShrAssign => AssignOp::Shr,
            TokenKind::AndNotAssign => AssignOp::BitAndNot,
            _ => return None,
        })
    }

    pub fn token(self) -> TokenKind {
        match self {
            AssignOp::Assign => TokenKind::Assign,
            AssignOp::Add => TokenKind::AddAssign,
            AssignOp::Sub => TokenKind::SubAssign,
            AssignOp::Mul => TokenKind::MulAssign,
            AssignOp::Div => TokenKind::QuoAssign,
            AssignOp::Rem => TokenKind::RemAssign,
            AssignOp::Exp => TokenKind::ExpAssign,
            AssignOp::BitAnd => TokenKind::AndAssign,
            AssignOp::BitOr => TokenKind::OrAssign,
            AssignOp::BitXor => TokenKind::XorAssign,
            AssignOp::Shl => TokenKind::ShlAssign,
            AssignOp::Shr => TokenKind::ShrAssign,
            AssignOp::BitAndNot => TokenKind::AndNotAssign,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.token().as_str()
    }
}
