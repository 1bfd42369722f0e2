// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement and declaration parsing.

use rose_ast::decl::{Decl, DeclKeyword, DeclKind, GenDecl, ValueSpec};
use rose_ast::expr::Expr;
use rose_ast::stmt::{AssignOp, Stmt, StmtKind};
use rose_ast::token::TokenKind;
use rose_ast::{Node, Pos};
use rose_resolve::{ObjKind, ResolveError};
use tracing::trace_span;

use crate::error::{ErrorKind, PResult};
use crate::parser::{Parser, STMT_START};

impl<'a> Parser<'a> {
    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_stmt(&mut self) -> PResult<Stmt> {
        let _span = trace_span!("Statement").entered();
        let kind = match self.tok {
            TokenKind::Const | TokenKind::Let | TokenKind::Var => StmtKind::Decl(self.parse_decl()?),
            // Tokens that may start an operand
            TokenKind::Ident
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Char
            | TokenKind::String
            | TokenKind::RawString
            | TokenKind::LParen
            | TokenKind::Add
            | TokenKind::Sub
            | TokenKind::Not
            | TokenKind::Invert
            | TokenKind::And => {
                let kind = self.parse_simple_stmt()?;
                self.expect_semi()?;
                kind
            }
            TokenKind::Semi => {
                let kind = StmtKind::Empty {
                    semi: self.pos,
                    implicit: self.lit != ";",
                };
                self.next();
                kind
            }
            _ => {
                let from = self.pos;
                self.error_expected(from, "statement")?;
                self.advance(STMT_START);
                StmtKind::Bad { from, to: self.pos }
            }
        };
        let id = self.next_id();
        Ok(Stmt::new(id, kind))
    }

    /// Parse an expression statement, an increment or decrement, or an
    /// assignment.
    fn parse_simple_stmt(&mut self) -> PResult<StmtKind> {
        let _span = trace_span!("SimpleStmt").entered();
        let mut lhs = self.parse_lhs_list()?;

        if let Some(op) = AssignOp::from_token(self.tok) {
            let tok_pos = self.pos;
            self.next();
            let rhs = self.parse_rhs_list()?;
            return Ok(StmtKind::Assign { lhs, tok_pos, op, rhs });
        }

        if lhs.len() > 1 {
            self.error_expected(lhs[0].pos(), "1 expression")?;
            // continue with the first expression
        }
        lhs.truncate(1);
        let Some(expr) = lhs.pop() else {
            return Ok(StmtKind::Bad { from: self.pos, to: self.pos });
        };

        match self.tok {
            TokenKind::Inc | TokenKind::Dec => {
                let kind = StmtKind::IncDec {
                    expr,
                    tok_pos: self.pos,
                    inc: self.tok == TokenKind::Inc,
                };
                self.next();
                Ok(kind)
            }
            _ => Ok(StmtKind::Expr(expr)),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_decl(&mut self) -> PResult<Decl> {
        let _span = trace_span!("Declaration").entered();
        let kind = match DeclKeyword::from_token(self.tok) {
            Some(keyword) => DeclKind::Gen(self.parse_gen_decl(keyword)?),
            None => {
                let from = self.pos;
                self.error_expected(from, "declaration")?;
                self.advance(STMT_START);
                DeclKind::Bad { from, to: self.pos }
            }
        };
        let id = self.next_id();
        Ok(Decl::new(id, kind))
    }

    /// `keyword spec` or `keyword ( spec; spec; ... )`.
    fn parse_gen_decl(&mut self, keyword: DeclKeyword) -> PResult<GenDecl> {
        let _span = trace_span!("GenDecl", keyword = %keyword).entered();
        let tok_pos = self.expect(keyword.token())?;
        let mut specs = Vec::new();
        let (mut lparen, mut rparen) = (Pos::NONE, Pos::NONE);

        if self.tok == TokenKind::LParen {
            lparen = self.pos;
            self.next();
            let mut index = 0;
            while self.tok != TokenKind::RParen && self.tok != TokenKind::Eof {
                specs.push(self.parse_value_spec(keyword, index)?);
                index += 1;
            }
            rparen = self.expect(TokenKind::RParen)?;
            self.expect_semi()?;
        } else {
            specs.push(self.parse_value_spec(keyword, 0)?);
        }

        Ok(GenDecl {
            tok_pos,
            keyword,
            lparen,
            specs,
            rparen,
        })
    }

    /// Parse one `names [type] [= values]` entry; `index` is its position
    /// inside a group. The names are declared only after the initializers
    /// are parsed, so they cannot refer to themselves.
    fn parse_value_spec(&mut self, keyword: DeclKeyword, index: usize) -> PResult<ValueSpec> {
        let _span = trace_span!("ValueSpec", index).entered();
        let pos = self.pos;
        let mut names = self.parse_ident_list()?;
        let ty = self.try_type()?;
        let mut values = Vec::new();
        if self.tok == TokenKind::Assign {
            self.next();
            values = self.parse_rhs_list()?;
        }
        self.expect_semi()?;

        self.check_value_spec(keyword, index, pos, names.len(), ty.as_ref(), &values)?;

        let id = self.next_id();
        let kind = match keyword {
            DeclKeyword::Const | DeclKeyword::Let => ObjKind::Const,
            DeclKeyword::Var => ObjKind::Var,
        };
        for name in &mut names {
            if let Err(err) = self.resolver.declare(name, kind, id, index) {
                self.report_redeclared(err)?;
            }
        }

        Ok(ValueSpec {
            id,
            names,
            ty,
            values,
        })
    }

    /// Check that a spec has the type and initializers its keyword needs.
    ///
    /// A `const` entry after the first in a group may leave out both type
    /// and value; nothing is inherited from earlier entries.
    fn check_value_spec(
        &mut self,
        keyword: DeclKeyword,
        index: usize,
        pos: Pos,
        names: usize,
        ty: Option<&Expr>,
        values: &[Expr],
    ) -> PResult<()> {
        if values.is_empty() {
            let missing = match keyword {
                DeclKeyword::Var if ty.is_none() => Some("missing variable type or initialization"),
                DeclKeyword::Let => Some("missing initialization"),
                DeclKeyword::Const if index == 0 || ty.is_some() => Some("missing constant value"),
                _ => None,
            };
            if let Some(message) = missing {
                self.declaration_error(pos, message)?;
            }
            return Ok(());
        }

        if values.len() < names {
            let message = match keyword {
                DeclKeyword::Const => "missing constant value",
                DeclKeyword::Let | DeclKeyword::Var => "missing initialization",
            };
            self.declaration_error(pos, message)?;
        } else if values.len() > names {
            self.declaration_error(values[names].pos(), "extra init expr")?;
        }
        Ok(())
    }

    fn declaration_error(&mut self, pos: Pos, message: &'static str) -> PResult<()> {
        let before = self.errors.len();
        self.error(pos, ErrorKind::Semantic, message)?;
        if self.errors.len() > before {
            if let (Some(err), Some(hint)) = (self.errors.last_mut(), crate::hints::for_declaration(message)) {
                err.hint = Some(hint.to_string());
            }
        }
        Ok(())
    }

    fn report_redeclared(&mut self, err: ResolveError) -> PResult<()> {
        let mut message = err.to_string();
        if let Some(previous) = err.previous() {
            message.push_str(&format!("\n\tprevious declaration at {}", self.position_of(previous)));
        }
        let before = self.errors.len();
        self.error(err.pos, ErrorKind::Semantic, message)?;
        if self.errors.len() > before {
            if let Some(last) = self.errors.last_mut() {
                last.cause = Some(err);
            }
        }
        Ok(())
    }
}
