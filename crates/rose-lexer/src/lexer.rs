// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer state machine.

use rose_ast::token::{Token, TokenKind};
use rose_ast::{Pos, Span};
use thiserror::Error;
use tracing::debug;

use crate::cursor::Cursor;

/// The lexer for Rose source code.
///
/// Produces one token per [`Lexer::next_token`] call. A newline becomes an
/// implicit `;` when the previous token could end a statement; otherwise it
/// is skipped like any other whitespace.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    base: u32,
    /// Insert a terminator before the next newline or at EOF.
    insert_semi: bool,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer whose first byte is at position `base`.
    pub fn new(source: &'a str, base: u32) -> Self {
        Self {
            cursor: Cursor::new(source),
            base,
            insert_semi: false,
            errors: Vec::new(),
        }
    }

    fn pos(&self, offset: usize) -> Pos {
        Pos(self.base) + offset
    }

    /// Record an error covering `start` up to the current offset.
    pub(crate) fn error(&mut self, start: usize, message: impl Into<String>) {
        let end = self.cursor.offset().max(start + 1);
        let err = LexError {
            span: Span::new(self.pos(start), self.pos(end)),
            message: message.into(),
        };
        debug!(offset = start, msg = %err.message, "lex error");
        self.errors.push(err);
    }

    /// Drain the errors recorded since the last call.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    fn token(&self, kind: TokenKind, start: usize, lit: &'a str) -> Token<'a> {
        Token {
            kind,
            span: Span::new(self.pos(start), self.pos(self.cursor.offset())),
            lit,
        }
    }

    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(|c| matches!(c, ' ' | '\t' | '\r'));
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Token<'a> {
        loop {
            self.skip_whitespace();
            let start = self.cursor.offset();

            let Some(ch) = self.cursor.bump() else {
                if self.insert_semi {
                    self.insert_semi = false;
                    return self.token(TokenKind::Semi, start, "");
                }
                return self.token(TokenKind::Eof, start, "");
            };

            let mut insert_semi = false;
            let kind = match ch {
                '\n' => {
                    if self.insert_semi {
                        self.insert_semi = false;
                        return self.token(TokenKind::Semi, start, "\n");
                    }
                    continue;
                }
                c if c == '_' || c.is_alphabetic() => {
                    self.cursor.eat_while(|c| c == '_' || c.is_alphanumeric());
                    let word = self.cursor.slice_from(start);
                    let kind = TokenKind::lookup(word);
                    insert_semi = matches!(
                        kind,
                        TokenKind::Ident
                            | TokenKind::Break
                            | TokenKind::Continue
                            | TokenKind::Fallthrough
                            | TokenKind::Return
                    );
                    self.insert_semi = insert_semi;
                    return self.token(kind, start, word);
                }
                c if c.is_ascii_digit() => {
                    let kind = self.scan_number(start, c);
                    return self.literal(kind, start);
                }
                '\'' => {
                    let kind = self.scan_char(start);
                    return self.literal(kind, start);
                }
                '"' => {
                    let kind = self.scan_string(start);
                    return self.literal(kind, start);
                }
                '`' => {
                    let kind = self.scan_raw_string(start);
                    return self.literal(kind, start);
                }
                '/' => {
                    if self.cursor.eat('/') {
                        self.cursor.eat_while(|c| c != '\n');
                        continue;
                    }
                    if self.cursor.eat('*') {
                        if self.skip_block_comment(start) && self.insert_semi {
                            self.insert_semi = false;
                            return self.token(TokenKind::Semi, start, "\n");
                        }
                        continue;
                    }
                    if self.cursor.eat('=') {
                        TokenKind::QuoAssign
                    } else {
                        TokenKind::Quo
                    }
                }
                '+' => {
                    if self.cursor.eat('+') {
                        insert_semi = true;
                        TokenKind::Inc
                    } else if self.cursor.eat('=') {
                        TokenKind::AddAssign
                    } else {
                        TokenKind::Add
                    }
                }
                '-' => {
                    if self.cursor.eat('-') {
                        insert_semi = true;
                        TokenKind::Dec
                    } else if self.cursor.eat('=') {
                        TokenKind::SubAssign
                    } else {
                        TokenKind::Sub
                    }
                }
                '*' => {
                    if self.cursor.eat('*') {
                        if self.cursor.eat('=') {
                            TokenKind::ExpAssign
                        } else {
                            TokenKind::Exp
                        }
                    } else if self.cursor.eat('=') {
                        TokenKind::MulAssign
                    } else {
                        TokenKind::Mul
                    }
                }
                '%' => self.switch2(TokenKind::Rem, TokenKind::RemAssign),
                '&' => {
                    if self.cursor.eat('^') {
                        self.switch2(TokenKind::AndNot, TokenKind::AndNotAssign)
                    } else {
                        self.switch2(TokenKind::And, TokenKind::AndAssign)
                    }
                }
                '|' => self.switch2(TokenKind::Or, TokenKind::OrAssign),
                '^' => self.switch2(TokenKind::Xor, TokenKind::XorAssign),
                '~' => TokenKind::Invert,
                '<' => {
                    if self.cursor.eat('<') {
                        self.switch2(TokenKind::Shl, TokenKind::ShlAssign)
                    } else if self.cursor.eat('-') {
                        TokenKind::Arrow
                    } else {
                        self.switch2(TokenKind::Lss, TokenKind::Leq)
                    }
                }
                '>' => {
                    if self.cursor.eat('>') {
                        self.switch2(TokenKind::Shr, TokenKind::ShrAssign)
                    } else {
                        self.switch2(TokenKind::Gtr, TokenKind::Geq)
                    }
                }
                '=' => self.switch2(TokenKind::Assign, TokenKind::Eql),
                '!' => self.switch2(TokenKind::Exclaim, TokenKind::Neq),
                '.' => {
                    if self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                        let kind = self.scan_fraction(start);
                        return self.literal(kind, start);
                    }
                    if self.cursor.eat('.') {
                        if !self.cursor.eat('.') {
                            self.error(start, "invalid token '..'");
                            continue;
                        }
                        TokenKind::Ellipsis
                    } else {
                        TokenKind::Period
                    }
                }
                '(' => TokenKind::LParen,
                '[' => TokenKind::LBrack,
                '{' => TokenKind::LBrace,
                ',' => TokenKind::Comma,
                ')' => {
                    insert_semi = true;
                    TokenKind::RParen
                }
                ']' => {
                    insert_semi = true;
                    TokenKind::RBrack
                }
                '}' => {
                    insert_semi = true;
                    TokenKind::RBrace
                }
                ';' => {
                    self.insert_semi = false;
                    return self.token(TokenKind::Semi, start, ";");
                }
                ':' => TokenKind::Colon,
                '?' => TokenKind::Question,
                other => {
                    // No token, and the terminator flag stays as it was.
                    self.error(start, illegal_char_message(other));
                    continue;
                }
            };

            self.insert_semi = insert_semi;
            return self.token(kind, start, "");
        }
    }

    /// `base`, or `with_eq` if the next character is `=`.
    fn switch2(&mut self, base: TokenKind, with_eq: TokenKind) -> TokenKind {
        if self.cursor.eat('=') {
            with_eq
        } else {
            base
        }
    }

    fn literal(&mut self, kind: TokenKind, start: usize) -> Token<'a> {
        self.insert_semi = true;
        let lit = self.cursor.slice_from(start);
        self.token(kind, start, lit)
    }

    /// Skips a `/* */` comment, the opening `/*` already consumed. Returns
    /// whether the comment contained a newline.
    fn skip_block_comment(&mut self, start: usize) -> bool {
        let mut has_newline = false;
        loop {
            match self.cursor.bump() {
                Some('*') if self.cursor.eat('/') => return has_newline,
                Some('\n') => has_newline = true,
                Some(_) => {}
                None => {
                    self.error(start, "comment not terminated");
                    return has_newline;
                }
            }
        }
    }

    /// Lex the whole input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> LexResult<'a> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let done = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if done {
                break;
            }
        }
        LexResult {
            tokens,
            errors: self.take_errors(),
        }
    }
}

fn illegal_char_message(ch: char) -> String {
    if ch.is_control() {
        format!("illegal character U+{:04X}", ch as u32)
    } else {
        format!("illegal character U+{:04X} '{}'", ch as u32, ch)
    }
}

/// Result of lexing a whole source.
#[derive(Debug)]
pub struct LexResult<'a> {
    pub tokens: Vec<Token<'a>>,
    pub errors: Vec<LexError>,
}

impl LexResult<'_> {
    /// Returns true if lexing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A lexical error: illegal character or malformed literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LexError {
    pub span: Span,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src, 1).tokenize().tokens.iter().map(|t| t.kind).collect()
    }

    fn lits(src: &str) -> Vec<String> {
        Lexer::new(src, 1)
            .tokenize()
            .tokens
            .iter()
            .map(|t| t.lit.to_string())
            .collect()
    }

    use TokenKind::{
        Add, AddAssign, And, AndAssign, AndNot, AndNotAssign, Arrow, Assign, Break, Colon, Comma,
        Const, Continue, Dec, Ellipsis, Eof, Eql, Exclaim, Exp, ExpAssign, Fallthrough, Fn, Geq,
        Gtr, Ident, Inc, Int, Invert, LAnd, LBrace, LBrack, LOr, LParen, Leq, Let, Lss, Mul,
        MulAssign, Neq, Not, Or, OrAssign, Period, Question, Quo, QuoAssign, RBrace, RBrack,
        RParen, Rem, RemAssign, Return, Semi, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign, Var,
        Xor, XorAssign,
    };

    #[test]
    fn declaration_gets_terminator() {
        assert_eq!(kinds("var a int"), vec![Var, Ident, Ident, Semi, Eof]);
        assert_eq!(lits("var a int\n"), vec!["var", "a", "int", "\n", ""]);
        assert_eq!(lits("var a int"), vec!["var", "a", "int", "", ""]);
    }

    #[test]
    fn explicit_semicolon_suppresses_implicit() {
        assert_eq!(kinds("a;\n"), vec![Ident, Semi, Eof]);
        assert_eq!(lits("a;"), vec!["a", ";", ""]);
    }

    #[test]
    fn newline_after_operator_is_skipped() {
        assert_eq!(kinds("a +\nb"), vec![Ident, Add, Ident, Semi, Eof]);
        assert_eq!(kinds("x = (\n1\n)"), vec![Ident, Assign, LParen, Int, Semi, RParen, Semi, Eof]);
    }

    #[test]
    fn terminating_tokens() {
        assert_eq!(kinds("x++\n"), vec![Ident, Inc, Semi, Eof]);
        assert_eq!(kinds("x--"), vec![Ident, Dec, Semi, Eof]);
        assert_eq!(kinds("return\nbreak\n"), vec![Return, Semi, Break, Semi, Eof]);
        assert_eq!(kinds("continue\nfallthrough"), vec![Continue, Semi, Fallthrough, Semi, Eof]);
        assert_eq!(kinds("]\n}\n"), vec![RBrack, Semi, RBrace, Semi, Eof]);
        // Keywords that cannot end a statement
        assert_eq!(kinds("const\nlet\nvar\nfn\n"), vec![Const, Let, Var, Fn, Eof]);
        // Nor can operator words
        assert_eq!(kinds("a and\nb or\nnot\n"), vec![Ident, LAnd, Ident, LOr, Not, Eof]);
    }

    #[test]
    fn operators() {
        let src = "+ - * / % ** & | ^ ~ << >> &^ += -= *= /= %= **= &= |= ^= <<= >>= &^= <- == < > = != <= >= ... ( [ { , . : ? !";
        assert_eq!(
            kinds(src),
            vec![
                Add, Sub, Mul, Quo, Rem, Exp, And, Or, Xor, Invert, Shl, Shr, AndNot, AddAssign,
                SubAssign, MulAssign, QuoAssign, RemAssign, ExpAssign, AndAssign, OrAssign,
                XorAssign, ShlAssign, ShrAssign, AndNotAssign, Arrow, Eql, Lss, Gtr, Assign, Neq,
                Leq, Geq, Ellipsis, LParen, LBrack, LBrace, Comma, Period, Colon, Question,
                Exclaim, Eof,
            ]
        );
    }

    #[test]
    fn operator_words() {
        assert_eq!(kinds("a or b and not c"), vec![Ident, LOr, Ident, LAnd, Not, Ident, Semi, Eof]);
        assert_eq!(lits("not x")[0], "not");
    }

    #[test]
    fn comments() {
        assert_eq!(kinds("a // trailing\nb"), vec![Ident, Semi, Ident, Semi, Eof]);
        assert_eq!(kinds("a /* inline */ + b"), vec![Ident, Add, Ident, Semi, Eof]);
        assert_eq!(kinds("a /* spans\nlines */ b"), vec![Ident, Semi, Ident, Semi, Eof]);
        assert_eq!(kinds("+ /* spans\nlines */ b"), vec![Add, Ident, Semi, Eof]);
    }

    #[test]
    fn unterminated_comment() {
        let result = Lexer::new("a /* open", 1).tokenize();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "comment not terminated");
        assert_eq!(result.tokens.last().map(|t| t.kind), Some(Eof));
    }

    #[test]
    fn illegal_character_resumes() {
        let result = Lexer::new("a @ b", 1).tokenize();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "illegal character U+0040 '@'");
        assert_eq!(result.errors[0].span, Span::new(Pos(3), Pos(4)));
        let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![Ident, Ident, Semi, Eof]);
    }

    #[test]
    fn illegal_character_keeps_terminator_flag() {
        assert_eq!(kinds("a @\nb"), vec![Ident, Semi, Ident, Semi, Eof]);
        assert_eq!(kinds("+ @\nb"), vec![Add, Ident, Semi, Eof]);
    }

    #[test]
    fn double_dot_is_invalid() {
        let result = Lexer::new("a .. b", 1).tokenize();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "invalid token '..'");
        assert_eq!(result.tokens.len(), 4);
    }

    #[test]
    fn positions_are_offset_by_base() {
        let result = Lexer::new("var x", 10).tokenize();
        assert_eq!(result.tokens[0].span, Span::new(Pos(10), Pos(13)));
        assert_eq!(result.tokens[1].span, Span::new(Pos(14), Pos(15)));
        // implicit terminator at EOF is empty
        assert!(result.tokens[2].span.is_empty());
        assert!(result.tokens[2].is_implicit_semi());
    }

    #[test]
    fn unicode_identifiers() {
        assert_eq!(lits("ñame_2 日本"), vec!["ñame_2", "日本", "", ""]);
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = Lexer::new("", 1);
        assert_eq!(lexer.next_token().kind, Eof);
        assert_eq!(lexer.next_token().kind, Eof);
    }
}
