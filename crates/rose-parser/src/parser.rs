// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser state, token navigation and error recovery.
//!
//! Grammar productions live in `expr.rs` and `stmt.rs`; both are `impl`
//! blocks on the [`Parser`] defined here.

use rose_ast::expr::{Expr, ExprKind};
use rose_ast::token::TokenKind;
use rose_ast::{File, NodeId, Pos, SourceFile};
use rose_lexer::Lexer;
use rose_resolve::{Resolver, ScopeKind};
use tracing::{debug, trace, warn};

use crate::error::{Bailout, ErrorKind, PResult, ParseError};
use crate::{ParseOptions, ParseResult};

/// Diagnostics recorded before the parser gives up.
const MAX_ERRORS: usize = 10;

/// Retries allowed at one synchronization point without progress.
const MAX_SYNC_RETRIES: u32 = 10;

/// Deepest expression nesting accepted. Every parenthesis, unary operator
/// and binary operator of one expression counts one level.
pub(crate) const MAX_NESTING_DEPTH: usize = 128;

/// Tokens that may start a statement; error recovery stops here.
pub(crate) const STMT_START: &[TokenKind] = &[
    TokenKind::Break,
    TokenKind::Const,
    TokenKind::Continue,
    TokenKind::Fallthrough,
    TokenKind::If,
    TokenKind::Let,
    TokenKind::Return,
    TokenKind::Var,
];

/// Tokens that may end an expression.
pub(crate) const EXPR_END: &[TokenKind] = &[
    TokenKind::Comma,
    TokenKind::Colon,
    TokenKind::Semi,
    TokenKind::RParen,
    TokenKind::RBrack,
    TokenKind::RBrace,
];

/// The parser for one Rose source unit.
///
/// Holds a single look-ahead token (`pos`, `tok`, `lit`) pulled from the
/// lexer on demand.
pub struct Parser<'a> {
    file: &'a SourceFile,
    lexer: Lexer<'a>,
    options: ParseOptions,
    /// Collected diagnostics, lexical ones included
    pub(crate) errors: Vec<ParseError>,

    // Look-ahead token
    pub(crate) pos: Pos,
    pub(crate) tok: TokenKind,
    pub(crate) lit: &'a str,

    // Error recovery
    sync_pos: Pos,
    sync_cnt: u32,

    /// Nesting depth of the current expression
    pub(crate) nest_lev: usize,
    /// Set while parsing a right-hand side
    pub(crate) in_rhs: bool,

    pub(crate) resolver: Resolver,
    /// Counter for generating unique NodeIds
    next_node_id: u32,
}

impl<'a> Parser<'a> {
    pub fn new(file: &'a SourceFile, source: &'a str, options: ParseOptions) -> Self {
        Self {
            file,
            lexer: Lexer::new(source, file.base()),
            options,
            errors: Vec::new(),
            pos: Pos::NONE,
            tok: TokenKind::Illegal,
            lit: "",
            sync_pos: Pos::NONE,
            sync_cnt: 0,
            nest_lev: 0,
            in_rhs: false,
            resolver: Resolver::new(),
            next_node_id: 0,
        }
    }

    pub(crate) fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    // =========================================================================
    // Entry point
    // =========================================================================

    /// Parse the whole source unit.
    ///
    /// Always returns a tree. If the very first token is already malformed the
    /// tree is empty; if the error cap is hit the statements completed so far
    /// are kept.
    pub fn parse_file(mut self) -> ParseResult {
        let _span = tracing::debug_span!("parse_file", file = self.file.name()).entered();

        self.next();
        if !self.errors.is_empty() {
            debug!(errors = self.errors.len(), "first token malformed, giving up");
            return self.finish(Vec::new());
        }

        self.resolver.open_scope(ScopeKind::File);
        let mut stmts = Vec::new();
        if self.parse_stmt_list(&mut stmts).is_err() {
            warn!(
                file = self.file.name(),
                errors = self.errors.len(),
                statements = stmts.len(),
                "too many errors, parse aborted"
            );
        }
        self.resolver.close_scope();

        self.finish(stmts)
    }

    fn parse_stmt_list(&mut self, stmts: &mut Vec<rose_ast::stmt::Stmt>) -> PResult<()> {
        while self.tok != TokenKind::Eof {
            stmts.push(self.parse_stmt()?);
        }
        Ok(())
    }

    fn finish(self, stmts: Vec<rose_ast::stmt::Stmt>) -> ParseResult {
        let resolution = self.resolver.finish();
        let mut errors = self.errors;
        errors.sort_by_key(|e| e.pos);
        ParseResult {
            file: File {
                stmts,
                unresolved: resolution.unresolved,
            },
            objects: resolution.objects,
            scopes: resolution.scopes,
            errors,
        }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    /// Advance to the next token, collecting any lexical errors on the way.
    pub(crate) fn next(&mut self) {
        let token = self.lexer.next_token();
        for err in self.lexer.take_errors() {
            let position = self.file.position(err.span.start);
            // Past the cap the error is dropped; the next parser report bails.
            if !self.options.all_errors && (self.same_line_as_last(&position) || self.errors.len() > MAX_ERRORS) {
                trace!(%position, msg = %err.message, "suppressed lexical diagnostic");
                continue;
            }
            self.errors
                .push(ParseError::new(position, err.span.start, ErrorKind::Lexical, err.message));
        }
        self.pos = token.span.start;
        self.tok = token.kind;
        self.lit = token.lit;
        trace!(
            pos = %self.file.position(self.pos),
            tok = %self.tok,
            lit = self.lit,
            "token"
        );
    }

    /// Consume the current token, reporting an error first if it is not
    /// `tok`. The token is consumed either way so parsing makes progress.
    pub(crate) fn expect(&mut self, tok: TokenKind) -> PResult<Pos> {
        let pos = self.pos;
        if self.tok != tok {
            self.error_expected(pos, &format!("'{tok}'"))?;
        }
        self.next();
        Ok(pos)
    }

    /// Consume a statement terminator. It may be left out before `)` or `}`.
    pub(crate) fn expect_semi(&mut self) -> PResult<()> {
        if self.tok != TokenKind::RParen && self.tok != TokenKind::RBrace {
            if self.tok == TokenKind::Semi {
                self.next();
            } else {
                self.error_expected(self.pos, "';'")?;
            }
        }
        Ok(())
    }

    /// Skip tokens up to the next one in `to`, or EOF.
    ///
    /// Stopping twice at the same synchronization point is allowed a bounded
    /// number of times; after that the token is skipped so the caller cannot
    /// loop forever.
    pub(crate) fn advance(&mut self, to: &[TokenKind]) {
        let start = self.pos;
        let mut skipped = 0usize;
        while self.tok != TokenKind::Eof {
            if to.contains(&self.tok) {
                if self.pos == self.sync_pos && self.sync_cnt < MAX_SYNC_RETRIES {
                    self.sync_cnt += 1;
                    break;
                }
                if self.pos > self.sync_pos {
                    self.sync_pos = self.pos;
                    self.sync_cnt = 0;
                    break;
                }
            }
            self.next();
            skipped += 1;
        }
        if skipped > 0 {
            debug!(from = %self.file.position(start), skipped, stop = %self.tok, "recovery skipped tokens");
        }
    }

    // =========================================================================
    // Nesting
    // =========================================================================

    /// Enter one more level of expression nesting.
    ///
    /// Past [`MAX_NESTING_DEPTH`] the level is not entered: the error is
    /// reported, the rest of the statement is skipped and the `Bad`
    /// expression covering it is returned for the caller to use instead.
    pub(crate) fn enter_nesting(&mut self) -> PResult<Option<Expr>> {
        if self.nest_lev < MAX_NESTING_DEPTH {
            self.nest_lev += 1;
            return Ok(None);
        }
        let from = self.pos;
        self.error(from, ErrorKind::Syntax, "exceeded max nesting depth")?;
        self.advance(STMT_START);
        let id = self.next_id();
        Ok(Some(Expr::new(id, ExprKind::Bad { from, to: self.pos })))
    }

    pub(crate) fn leave_nesting(&mut self) {
        self.nest_lev = self.nest_lev.saturating_sub(1);
    }

    // =========================================================================
    // Errors
    // =========================================================================

    pub(crate) fn error(&mut self, pos: Pos, kind: ErrorKind, message: impl Into<String>) -> PResult<()> {
        self.report(pos, kind, message.into(), None)
    }

    /// Report that `what` was expected at `pos`. When `pos` is the current
    /// token the message also says what was found instead.
    pub(crate) fn error_expected(&mut self, pos: Pos, what: &str) -> PResult<()> {
        let mut message = format!("expected {what}");
        if pos == self.pos {
            if self.tok == TokenKind::Semi && self.lit == "\n" {
                message.push_str(", found newline");
            } else if self.tok.is_literal() {
                message.push_str(", found ");
                message.push_str(self.lit);
            } else {
                message.push_str(&format!(", found '{}'", self.tok));
            }
        }
        let hint = crate::hints::for_expected(what, self.tok);
        self.report(pos, ErrorKind::Syntax, message, hint)
    }

    fn report(&mut self, pos: Pos, kind: ErrorKind, message: String, hint: Option<&str>) -> PResult<()> {
        let position = self.file.position(pos);
        if !self.options.all_errors {
            // One diagnostic per line keeps cascades out of the output.
            if self.same_line_as_last(&position) {
                trace!(%position, msg = %message, "suppressed diagnostic on same line");
                return Ok(());
            }
            if self.errors.len() > MAX_ERRORS {
                return Err(Bailout);
            }
        }
        debug!(%position, kind = kind.as_str(), msg = %message, "diagnostic");
        let mut err = ParseError::new(position, pos, kind, message);
        err.hint = hint.map(String::from);
        self.errors.push(err);
        Ok(())
    }

    fn same_line_as_last(&self, position: &rose_ast::Position) -> bool {
        self.errors.last().is_some_and(|last| last.position.line == position.line)
    }

    pub(crate) fn position_of(&self, pos: Pos) -> rose_ast::Position {
        self.file.position(pos)
    }
}
