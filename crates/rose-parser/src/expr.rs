// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression parsing using precedence climbing.

use rose_ast::expr::{BasicLit, BinOp, Expr, ExprKind, Ident, LitKind, UnaryOp};
use rose_ast::token::{TokenKind, LOWEST_PREC};
use tracing::trace_span;

use crate::error::{ErrorKind, PResult};
use crate::parser::{Parser, EXPR_END, STMT_START};

impl<'a> Parser<'a> {
    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Parse an identifier. A missing name degrades to `_` so the
    /// surrounding structure stays intact.
    pub(crate) fn parse_ident(&mut self) -> PResult<Ident> {
        let pos = self.pos;
        let mut name: &str = Ident::BLANK;
        if self.tok == TokenKind::Ident {
            name = self.lit;
            self.next();
        } else {
            self.expect(TokenKind::Ident)?;
        }
        Ok(Ident::new(self.next_id(), pos, name))
    }

    pub(crate) fn parse_ident_list(&mut self) -> PResult<Vec<Ident>> {
        let _span = trace_span!("IdentList").entered();
        let mut list = vec![self.parse_ident()?];
        while self.tok == TokenKind::Comma {
            self.next();
            list.push(self.parse_ident()?);
        }
        Ok(list)
    }

    /// Bind `x` if it is a bare identifier.
    pub(crate) fn resolve_expr(&mut self, x: &mut Expr) {
        if let Some(ident) = x.as_ident_mut() {
            self.resolver.resolve(ident);
        }
    }

    // =========================================================================
    // Expression lists
    // =========================================================================

    fn parse_expr_list(&mut self, lhs: bool) -> PResult<Vec<Expr>> {
        let _span = trace_span!("ExpressionList").entered();
        let mut list = vec![self.parse_expr(lhs)?];
        while self.tok == TokenKind::Comma {
            self.next();
            list.push(self.parse_expr(lhs)?);
        }
        Ok(list)
    }

    /// Parse the left-hand side of a simple statement. Identifiers are
    /// resolved once the whole list is known.
    pub(crate) fn parse_lhs_list(&mut self) -> PResult<Vec<Expr>> {
        let old = std::mem::replace(&mut self.in_rhs, false);
        let result = self.parse_expr_list(true);
        self.in_rhs = old;
        let mut list = result?;
        if self.tok != TokenKind::Colon {
            for x in &mut list {
                self.resolve_expr(x);
            }
        }
        Ok(list)
    }

    pub(crate) fn parse_rhs_list(&mut self) -> PResult<Vec<Expr>> {
        let old = std::mem::replace(&mut self.in_rhs, true);
        let result = self.parse_expr_list(false);
        self.in_rhs = old;
        result
    }

    fn parse_rhs_or_type(&mut self) -> PResult<Expr> {
        let old = std::mem::replace(&mut self.in_rhs, true);
        let result = self.parse_expr(false);
        self.in_rhs = old;
        result
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parse an expression. With `lhs` set, a leading identifier is left
    /// unresolved for the caller.
    pub(crate) fn parse_expr(&mut self, lhs: bool) -> PResult<Expr> {
        let _span = trace_span!("Expression").entered();
        self.parse_binary_expr(lhs, LOWEST_PREC + 1)
    }

    /// The current token as a binary operator. Inside a right-hand side a
    /// stray `=` is read as `==` so `x = a = b` reports a useful error.
    fn tok_prec(&self) -> TokenKind {
        if self.in_rhs && self.tok == TokenKind::Assign {
            return TokenKind::Eql;
        }
        self.tok
    }

    /// Precedence climbing: parse operands joined by operators that bind at
    /// least as tightly as `prec1`.
    fn parse_binary_expr(&mut self, lhs: bool, prec1: u8) -> PResult<Expr> {
        let _span = trace_span!("BinaryExpr", prec1).entered();
        // Each operator of the chain enters one nesting level; all of them
        // are left together here.
        let level = self.nest_lev;
        let result = self.parse_binary_chain(lhs, prec1);
        self.nest_lev = level;
        result
    }

    fn parse_binary_chain(&mut self, mut lhs: bool, prec1: u8) -> PResult<Expr> {
        let mut x = self.parse_unary_expr(lhs)?;
        loop {
            let op_tok = self.tok_prec();
            let Some(op) = BinOp::from_token(op_tok) else {
                return Ok(x);
            };
            let oprec = op.precedence();
            if oprec < prec1 {
                return Ok(x);
            }
            let op_pos = self.expect(op_tok)?;
            if lhs {
                self.resolve_expr(&mut x);
                lhs = false;
            }
            // `**` recurses at its own level, making it right-associative.
            let next_prec = if op_tok.is_right_assoc() { oprec } else { oprec + 1 };
            let y = match self.enter_nesting()? {
                Some(bad) => bad,
                None => self.parse_binary_expr(false, next_prec)?,
            };
            let id = self.next_id();
            x = Expr::new(
                id,
                ExprKind::Binary {
                    lhs: Box::new(x),
                    op_pos,
                    op,
                    rhs: Box::new(y),
                },
            );
        }
    }

    fn parse_unary_expr(&mut self, lhs: bool) -> PResult<Expr> {
        let _span = trace_span!("UnaryExpr").entered();
        if let Some(op) = UnaryOp::from_token(self.tok) {
            if let Some(bad) = self.enter_nesting()? {
                return Ok(bad);
            }
            let op_pos = self.pos;
            self.next();
            let operand = self.parse_unary_expr(false);
            self.leave_nesting();
            let operand = operand?;
            let id = self.next_id();
            return Ok(Expr::new(
                id,
                ExprKind::Unary {
                    op_pos,
                    op,
                    operand: Box::new(operand),
                },
            ));
        }
        self.parse_operand(lhs)
    }

    /// Parse an identifier, a literal, or a parenthesized expression.
    /// Anything else yields a `Bad` expression covering the skipped tokens.
    fn parse_operand(&mut self, lhs: bool) -> PResult<Expr> {
        let _span = trace_span!("Operand").entered();
        if let Some(kind) = LitKind::from_token(self.tok) {
            let lit = BasicLit {
                pos: self.pos,
                kind,
                value: self.lit.to_string(),
            };
            self.next();
            let id = self.next_id();
            return Ok(Expr::new(id, ExprKind::BasicLit(lit)));
        }
        match self.tok {
            TokenKind::Ident => {
                let mut ident = self.parse_ident()?;
                if !lhs {
                    self.resolver.resolve(&mut ident);
                }
                let id = self.next_id();
                Ok(Expr::new(id, ExprKind::Ident(ident)))
            }
            TokenKind::LParen => {
                if let Some(bad) = self.enter_nesting()? {
                    return Ok(bad);
                }
                let lparen = self.pos;
                self.next();
                let inner = self.parse_rhs_or_type();
                self.leave_nesting();
                let inner = inner?;
                let rparen = self.expect(TokenKind::RParen)?;
                let id = self.next_id();
                Ok(Expr::new(
                    id,
                    ExprKind::Paren {
                        lparen,
                        expr: Box::new(inner),
                        rparen,
                    },
                ))
            }
            _ => {
                let from = self.pos;
                self.error_expected(from, "operand")?;
                self.advance(STMT_START);
                let id = self.next_id();
                Ok(Expr::new(id, ExprKind::Bad { from, to: self.pos }))
            }
        }
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Parse an optional type: a type name or a parenthesized type.
    pub(crate) fn try_type(&mut self) -> PResult<Option<Expr>> {
        let _span = trace_span!("Type").entered();
        let Some(mut ty) = self.try_ident_or_type()? else {
            return Ok(None);
        };
        self.resolve_type(&mut ty)?;
        Ok(Some(ty))
    }

    fn try_ident_or_type(&mut self) -> PResult<Option<Expr>> {
        match self.tok {
            TokenKind::Ident => {
                let ident = self.parse_ident()?;
                let id = self.next_id();
                Ok(Some(Expr::new(id, ExprKind::Ident(ident))))
            }
            TokenKind::LParen => {
                if let Some(bad) = self.enter_nesting()? {
                    return Ok(Some(bad));
                }
                let lparen = self.pos;
                self.next();
                let inner = self.parse_type();
                self.leave_nesting();
                let inner = inner?;
                let rparen = self.expect(TokenKind::RParen)?;
                let id = self.next_id();
                Ok(Some(Expr::new(
                    id,
                    ExprKind::Paren {
                        lparen,
                        expr: Box::new(inner),
                        rparen,
                    },
                )))
            }
            _ => Ok(None),
        }
    }

    fn parse_type(&mut self) -> PResult<Expr> {
        if let Some(ty) = self.try_ident_or_type()? {
            return Ok(ty);
        }
        let from = self.pos;
        self.error_expected(from, "type")?;
        self.advance(EXPR_END);
        let id = self.next_id();
        Ok(Expr::new(id, ExprKind::Bad { from, to: self.pos }))
    }

    /// Bind the name inside a type expression. Built-in type names are left
    /// alone; a name that denotes a constant or variable is an error.
    fn resolve_type(&mut self, ty: &mut Expr) -> PResult<()> {
        let Some(ident) = innermost_ident(ty) else {
            return Ok(());
        };
        if BUILTIN_TYPES.contains(&ident.name.as_str()) {
            return Ok(());
        }
        if self.resolver.resolve(ident).is_some() {
            let message = format!("{} is not a type", ident.name);
            self.error(ident.pos, ErrorKind::Semantic, message)?;
        }
        Ok(())
    }
}

/// Predeclared type names.
pub const BUILTIN_TYPES: &[&str] = &["any", "bool", "char", "float", "int", "string"];

fn innermost_ident(ty: &mut Expr) -> Option<&mut Ident> {
    match &mut ty.kind {
        ExprKind::Paren { expr, .. } => innermost_ident(expr),
        ExprKind::Ident(ident) => Some(ident),
        _ => None,
    }
}
