// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes.

use std::fmt;

use crate::span::Pos;
use crate::token::TokenKind;
use crate::{Node, NodeId, ObjectId};

/// An expression in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Placeholder for a malformed expression.
    Bad { from: Pos, to: Pos },
    Ident(Ident),
    BasicLit(BasicLit),
    /// Parenthesized expression
    Paren {
        lparen: Pos,
        expr: Box<Expr>,
        rparen: Pos,
    },
    Unary {
        op_pos: Pos,
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        lhs: Box<Expr>,
        op_pos: Pos,
        op: BinOp,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn new(id: NodeId, kind: ExprKind) -> Self {
        Self { id, kind }
    }

    pub fn is_bad(&self) -> bool {
        matches!(self.kind, ExprKind::Bad { .. })
    }

    pub fn as_ident(&self) -> Option<&Ident> {
        match &self.kind {
            ExprKind::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    pub fn as_ident_mut(&mut self) -> Option<&mut Ident> {
        match &mut self.kind {
            ExprKind::Ident(ident) => Some(ident),
            _ => None,
        }
    }
}

impl Node for Expr {
    fn pos(&self) -> Pos {
        match &self.kind {
            ExprKind::Bad { from, .. } => *from,
            ExprKind::Ident(ident) => ident.pos(),
            ExprKind::BasicLit(lit) => lit.pos,
            ExprKind::Paren { lparen, .. } => *lparen,
            ExprKind::Unary { op_pos, .. } => *op_pos,
            ExprKind::Binary { lhs, .. } => lhs.pos(),
        }
    }

    fn end(&self) -> Pos {
        match &self.kind {
            ExprKind::Bad { to, .. } => *to,
            ExprKind::Ident(ident) => ident.end(),
            ExprKind::BasicLit(lit) => lit.pos + lit.value.len(),
            ExprKind::Paren { rparen, .. } => *rparen + 1,
            ExprKind::Unary { operand, .. } => operand.end(),
            ExprKind::Binary { rhs, .. } => rhs.end(),
        }
    }
}

/// What an identifier denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
    /// Not looked up (declaration sites before declaring, `_`, type names
    /// that are built in).
    #[default]
    Unbound,
    /// Bound to a declared object.
    Resolved(ObjectId),
    /// Looked up without success and collected in [`File::unresolved`].
    ///
    /// [`File::unresolved`]: crate::File::unresolved
    Unresolved,
}

/// An identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub id: NodeId,
    pub pos: Pos,
    pub name: String,
    pub binding: Binding,
}

impl Ident {
    /// Name used for the blank identifier and for identifiers that could
    /// not be parsed.
    pub const BLANK: &'static str = "_";

    pub fn new(id: NodeId, pos: Pos, name: impl Into<String>) -> Self {
        Ident {
            id,
            pos,
            name: name.into(),
            binding: Binding::Unbound,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name == Self::BLANK
    }

    pub fn is_exported(&self) -> bool {
        crate::token::is_exported(&self.name)
    }
}

impl Node for Ident {
    fn pos(&self) -> Pos {
        self.pos
    }

    fn end(&self) -> Pos {
        self.pos + self.name.len()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Kind of a basic literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Char,
    String,
    RawString,
}

impl LitKind {
    pub fn from_token(kind: TokenKind) -> Option<LitKind> {
        match kind {
            TokenKind::Int => Some(LitKind::Int),
            TokenKind::Float => Some(LitKind::Float),
            TokenKind::Char => Some(LitKind::Char),
            TokenKind::String => Some(LitKind::String),
            TokenKind::RawString => Some(LitKind::RawString),
            _ => None,
        }
    }

    pub fn token(self) -> TokenKind {
        match self {
            LitKind::Int => TokenKind::Int,
            LitKind::Float => TokenKind::Float,
            LitKind::Char => TokenKind::Char,
            LitKind::String => TokenKind::String,
            LitKind::RawString => TokenKind::RawString,
        }
    }
}

/// A literal of basic type. `value` is the exact source text, quotes and
/// prefixes included: `42`, `0x7f`, `1e-9`, `'a'`, `"foo"`, `` `raw` ``.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicLit {
    pub pos: Pos,
    pub kind: LitKind,
    pub value: String,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    LOr,
    LAnd,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    BitOr,
    BitXor,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitAnd,
    BitAndNot,
    Exp,
}

impl BinOp {
    pub fn from_token(kind: TokenKind) -> Option<BinOp> {
        Some(match kind {
            TokenKind::LOr => BinOp::LOr,
            TokenKind::LAnd => BinOp::LAnd,
            TokenKind::Eql => BinOp::Eq,
            TokenKind::Neq => BinOp::Ne,
            TokenKind::Lss => BinOp::Lt,
            TokenKind::Leq => BinOp::Le,
            TokenKind::Gtr => BinOp::Gt,
            TokenKind::Geq => BinOp::Ge,
            TokenKind::Add => BinOp::Add,
            TokenKind::Sub => BinOp::Sub,
            TokenKind::Or => BinOp::BitOr,
            TokenKind::Xor => BinOp::BitXor,
            TokenKind::Mul => BinOp::Mul,
            TokenKind::Quo => BinOp::Div,
            TokenKind::Rem => BinOp::Rem,
            TokenKind::Shl => BinOp::Shl,
            TokenKind::Shr => BinOp::Shr,
            TokenKind::And => BinOp::BitAnd,
            TokenKind::AndNot => BinOp::BitAndNot,
            TokenKind::Exp => BinOp::Exp,
            _ => return None,
        })
    }

    pub fn token(self) -> TokenKind {
        match self {
            BinOp::LOr => TokenKind::LOr,
            BinOp::LAnd => TokenKind::LAnd,
            BinOp::Eq => TokenKind::Eql,
            BinOp::Ne => TokenKind::Neq,
            BinOp::Lt => TokenKind::Lss,
            BinOp::Le => TokenKind::Leq,
            BinOp::Gt => TokenKind::Gtr,
            BinOp::Ge => TokenKind::Geq,
            BinOp::Add => TokenKind::Add,
            BinOp::Sub => TokenKind::Sub,
            BinOp::BitOr => TokenKind::Or,
            BinOp::BitXor => TokenKind::Xor,
            BinOp::Mul => TokenKind::Mul,
            BinOp::Div => TokenKind::Quo,
            BinOp::Rem => TokenKind::Rem,
            BinOp::Shl => TokenKind::Shl,
            BinOp::Shr => TokenKind::Shr,
            BinOp::BitAnd => TokenKind::And,
            BinOp::BitAndNot => TokenKind::AndNot,
            BinOp::Exp => TokenKind::Exp,
        }
    }

    pub fn precedence(self) -> u8 {
        self.token().precedence()
    }

    pub fn as_str(self) -> &'static str {
        self.token().as_str()
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Neg,
    /// `not x`
    Not,
    /// `~x`
    Invert,
    /// `&x`
    Ref,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<UnaryOp> {
        match kind {
            TokenKind::Add => Some(UnaryOp::Plus),
            TokenKind::Sub => Some(UnaryOp::Neg),
            TokenKind::Not => Some(UnaryOp::Not),
            TokenKind::Invert => Some(UnaryOp::Invert),
            TokenKind::And => Some(UnaryOp::Ref),
            _ => None,
        }
    }

    pub fn token(self) -> TokenKind {
        match self {
            UnaryOp::Plus => TokenKind::Add,
            UnaryOp::Neg => TokenKind::Sub,
            UnaryOp::Not => TokenKind::Not,
            UnaryOp::Invert => TokenKind::Invert,
            UnaryOp::Ref => TokenKind::And,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.token().as_str()
    }
}

/// Strips any number of enclosing parentheses.
pub fn unparen(mut expr: &Expr) -> &Expr {
    while let ExprKind::Paren { expr: inner, .. } = &expr.kind {
        expr = inner;
    }
    expr
}

/// Prints the expression in source form. Grouping parentheses are kept as
/// written; none are added.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Bad { .. } => f.write_str("BadExpr"),
            ExprKind::Ident(ident) => write!(f, "{ident}"),
            ExprKind::BasicLit(lit) => f.write_str(&lit.value),
            ExprKind::Paren { expr, .. } => write!(f, "({expr})"),
            ExprKind::Unary { op: UnaryOp::Not, operand, .. } => write!(f, "not {operand}"),
            ExprKind::Unary { op, operand, .. } => {
                let operand = operand.to_string();
                // `- -a` must not print as `--a`
                if operand.starts_with(|c: char| "+-*/%&|^<>=!~".contains(c)) {
                    write!(f, "{} {operand}", op.as_str())
                } else {
                    write!(f, "{}{operand}", op.as_str())
                }
            }
            ExprKind::Binary { lhs, op, rhs, .. } => write!(f, "{lhs} {} {rhs}", op.as_str()),
        }
    }
}
