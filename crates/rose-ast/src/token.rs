// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions shared by the lexer and parser.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::span::{Pos, Span};

/// Precedence of non-operators.
pub const LOWEST_PREC: u8 = 0;
/// Precedence of unary operators.
pub const UNARY_PREC: u8 = 7;
/// Catch-all precedence for selectors, indexing and the like.
pub const HIGHEST_PREC: u8 = 8;

/// A token produced by the lexer.
///
/// `lit` borrows from the source for identifiers, keywords, operator words
/// and literals. For an implicit terminator it is `"\n"` or `""` (end of
/// input); an explicit `;` carries `";"`. Other punctuation carries `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub lit: &'src str,
}

impl<'src> Token<'src> {
    pub fn pos(&self) -> Pos {
        self.span.start
    }

    /// Whether this is a terminator synthesized from a newline or EOF.
    pub fn is_implicit_semi(&self) -> bool {
        self.kind == TokenKind::Semi && self.lit != ";"
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // Special
    Illegal,
    Eof,
    Comment,

    // Identifiers and basic literals
    Ident,
    Int,
    Float,
    Char,
    String,
    RawString,

    // Operators
    Add,    // +
    Sub,    // -
    Mul,    // *
    Quo,    // /
    Rem,    // %
    Exp,    // **
    And,    // &
    Or,     // |
    Xor,    // ^
    Invert, // ~
    Shl,    // <<
    Shr,    // >>
    AndNot, // &^

    AddAssign,    // +=
    SubAssign,    // -=
    MulAssign,    // *=
    QuoAssign,    // /=
    RemAssign,    // %=
    ExpAssign,    // **=
    AndAssign,    // &=
    OrAssign,     // |=
    XorAssign,    // ^=
    ShlAssign,    // <<=
    ShrAssign,    // >>=
    AndNotAssign, // &^=

    LAnd,  // and
    LOr,   // or
    Arrow, // <-
    Inc,   // ++
    Dec,   // --

    Eql,    // ==
    Lss,    // <
    Gtr,    // >
    Assign, // =
    Not,    // not

    Neq,      // !=
    Leq,      // <=
    Geq,      // >=
    Ellipsis, // ...

    // Delimiters
    LParen,
    LBrack,
    LBrace,
    Comma,
    Period,
    RParen,
    RBrack,
    RBrace,
    Semi,
    Colon,
    Question,
    Exclaim,

    // Keywords
    Break,
    Const,
    Continue,
    Else,
    Fallthrough,
    Fn,
    If,
    Let,
    Return,
    Var,
}

const KEYWORDS: [TokenKind; 10] = [
    TokenKind::Break,
    TokenKind::Const,
    TokenKind::Continue,
    TokenKind::Else,
    TokenKind::Fallthrough,
    TokenKind::Fn,
    TokenKind::If,
    TokenKind::Let,
    TokenKind::Return,
    TokenKind::Var,
];

const OPERATOR_WORDS: [TokenKind; 3] = [TokenKind::LAnd, TokenKind::LOr, TokenKind::Not];

static KEYWORD_TABLE: LazyLock<HashMap<&'static str, TokenKind>> =
    LazyLock::new(|| KEYWORDS.iter().map(|&k| (k.as_str(), k)).collect());

static OPERATOR_WORD_TABLE: LazyLock<HashMap<&'static str, TokenKind>> =
    LazyLock::new(|| OPERATOR_WORDS.iter().map(|&k| (k.as_str(), k)).collect());

impl TokenKind {
    /// Canonical spelling. Literal classes and special tokens return their
    /// category name (`IDENT`, `INT`, `EOF`, ...).
    pub fn as_str(self) -> &'static str {
        use TokenKind::*;
        match self {
            Illegal => "ILLEGAL",
            Eof => "EOF",
            Comment => "COMMENT",

            Ident => "IDENT",
            Int => "INT",
            Float => "FLOAT",
            Char => "CHAR",
            String => "STRING",
            RawString => "RAW_STRING",

            Add => "+",
            Sub => "-",
            Mul => "*",
            Quo => "/",
            Rem => "%",
            Exp => "**",
            And => "&",
            Or => "|",
            Xor => "^",
            Invert => "~",
            Shl => "<<",
            Shr => ">>",
            AndNot => "&^",

            AddAssign => "+=",
            SubAssign => "-=",
            MulAssign => "*=",
            QuoAssign => "/=",
            RemAssign => "%=",
            ExpAssign => "**=",
            AndAssign => "&=",
            OrAssign => "|=",
            XorAssign => "^=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            AndNotAssign => "&^=",

            LAnd => "and",
            LOr => "or",
            Arrow => "<-",
            Inc => "++",
            Dec => "--",

            Eql => "==",
            Lss => "<",
            Gtr => ">",
            Assign => "=",
            Not => "not",

            Neq => "!=",
            Leq => "<=",
            Geq => ">=",
            Ellipsis => "...",

            LParen => "(",
            LBrack => "[",
            LBrace => "{",
            Comma => ",",
            Period => ".",
            RParen => ")",
            RBrack => "]",
            RBrace => "}",
            Semi => ";",
            Colon => ":",
            Question => "?",
            Exclaim => "!",

            Break => "break",
            Const => "const",
            Continue => "continue",
            Else => "else",
            Fallthrough => "fallthrough",
            Fn => "fn",
            If => "if",
            Let => "let",
            Return => "return",
            Var => "var",
        }
    }

    /// Binary operator precedence, or [`LOWEST_PREC`] for non-operators.
    pub fn precedence(self) -> u8 {
        use TokenKind::*;
        match self {
            LOr => 1,
            LAnd => 2,
            Eql | Neq | Lss | Leq | Gtr | Geq => 3,
            Add | Sub | Or | Xor => 4,
            Mul | Quo | Rem | Shl | Shr | And | AndNot => 5,
            Exp => 6,
            _ => LOWEST_PREC,
        }
    }

    /// Only exponentiation groups to the right.
    pub fn is_right_assoc(self) -> bool {
        self == TokenKind::Exp
    }

    /// Identifiers and basic literals.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Char
                | TokenKind::String
                | TokenKind::RawString
        )
    }

    /// Operators and delimiters, operator words included.
    pub fn is_operator(self) -> bool {
        self >= TokenKind::Add && self <= TokenKind::Exclaim
    }

    pub fn is_keyword(self) -> bool {
        self >= TokenKind::Break
    }

    /// The assignment operators, `=` included.
    pub fn is_assign_op(self) -> bool {
        self == TokenKind::Assign || (self >= TokenKind::AddAssign && self <= TokenKind::AndNotAssign)
    }

    /// Maps a word to its keyword, its operator word (`and`, `or`, `not`),
    /// or [`TokenKind::Ident`].
    pub fn lookup(word: &str) -> TokenKind {
        if let Some(&kind) = KEYWORD_TABLE.get(word) {
            return kind;
        }
        OPERATOR_WORD_TABLE
            .get(word)
            .copied()
            .unwrap_or(TokenKind::Ident)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `name` is a reserved keyword. Operator words are not keywords.
pub fn is_keyword(name: &str) -> bool {
    KEYWORD_TABLE.contains_key(name)
}

/// Whether `name` is a valid identifier: letters, digits and underscores,
/// not starting with a digit, and not a keyword.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric()) && !is_keyword(name)
}

/// Whether `name` starts with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
