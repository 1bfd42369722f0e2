// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Property-based tests for the lexer.
//!
//! 1. **Lexer never panics** and always terminates on arbitrary input
//! 2. **Spans within input** and **ordered**
//! 3. **EOF is last**, and appears exactly once
//! 4. **One trailing terminator** for single-line statements without `;`
//! 5. **Re-lexing spellings** reproduces the same token kinds
//! 6. **Valid fragments produce no errors**

use proptest::prelude::*;
use rose_ast::token::TokenKind;

use crate::Lexer;

const BASE: u32 = 1;

const VALID_FRAGMENTS: &[&str] = &[
    "var a int",
    "const (a = 1; b = 2)",
    "let s = \"hello\\n\"",
    "x += 0x1f &^ 0b101",
    "y = .5e+3 ** 2",
    "c = 'x' != '\\u00e9'",
    "r = `raw\ntext`",
    "ok = not a or b and c",
    "i++",
    "n <<= 3 // shift",
    "/* block */ z = (1 + 2) % 3",
];

const OPERANDS: &[&str] = &["a", "b1", "_x", "42", "3.5", "'c'", "\"s\"", "`r`"];
const BINARY_OPS: &[&str] = &["+", "-", "*", "/", "%", "**", "&", "|", "^", "<<", ">>", "&^", "==", "!=", "<", "<=", ">", ">=", "and", "or"];

fn operand() -> impl Strategy<Value = String> {
    prop::sample::select(OPERANDS).prop_map(str::to_string)
}

/// `lhs = x op y op z ...` on a single line.
fn single_line_stmt() -> impl Strategy<Value = String> {
    (
        operand(),
        prop::collection::vec((prop::sample::select(BINARY_OPS), operand()), 0..6),
    )
        .prop_map(|(first, rest)| {
            let mut s = format!("v = {first}");
            for (op, x) in rest {
                s.push(' ');
                s.push_str(op);
                s.push(' ');
                s.push_str(&x);
            }
            s
        })
}

fn kinds(src: &str) -> Vec<TokenKind> {
    Lexer::new(src, BASE).tokenize().tokens.iter().map(|t| t.kind).collect()
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn lexer_never_panics(input in "\\PC{0,300}") {
        let _ = Lexer::new(&input, BASE).tokenize();
    }

    #[test]
    fn token_spans_within_input(input in "\\PC{0,300}") {
        let result = Lexer::new(&input, BASE).tokenize();
        let end = BASE + input.len() as u32;
        for tok in &result.tokens {
            prop_assert!(tok.span.start <= tok.span.end, "{:?} in {:?}", tok, input);
            prop_assert!(tok.span.end.0 <= end, "{:?} past end of {:?}", tok, input);
        }
        for err in &result.errors {
            prop_assert!(err.span.start.0 < end.max(BASE + 1), "{:?} in {:?}", err, input);
        }
    }

    #[test]
    fn token_spans_ordered(input in "\\PC{0,300}") {
        let result = Lexer::new(&input, BASE).tokenize();
        for pair in result.tokens.windows(2) {
            prop_assert!(
                pair[1].span.start >= pair[0].span.end,
                "overlapping {:?} and {:?} in {:?}", pair[0], pair[1], input
            );
        }
    }

    #[test]
    fn eof_exactly_once_and_last(input in "\\PC{0,300}") {
        let tokens = kinds(&input);
        prop_assert_eq!(tokens.last(), Some(&TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|k| **k == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn single_line_gets_one_terminator(stmt in single_line_stmt()) {
        let result = Lexer::new(&stmt, BASE).tokenize();
        prop_assert!(result.is_ok(), "{:?}: {:?}", stmt, result.errors);
        let semis: Vec<_> = result.tokens.iter().filter(|t| t.kind == TokenKind::Semi).collect();
        prop_assert_eq!(semis.len(), 1);
        prop_assert!(semis[0].is_implicit_semi());
        let n = result.tokens.len();
        prop_assert_eq!(result.tokens[n - 2].kind, TokenKind::Semi);

        let with_newline = format!("{stmt}\n");
        let again = Lexer::new(&with_newline, BASE).tokenize();
        let n = again.tokens.len();
        prop_assert_eq!(again.tokens[n - 2].lit, "\n");
    }

    #[test]
    fn relexing_spellings_is_stable(stmt in single_line_stmt()) {
        let result = Lexer::new(&stmt, BASE).tokenize();
        let spelled: Vec<&str> = result
            .tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Semi && t.kind != TokenKind::Eof)
            .map(|t| if t.lit.is_empty() { t.kind.as_str() } else { t.lit })
            .collect();
        let relexed = spelled.join(" ");
        prop_assert_eq!(kinds(&relexed), kinds(&stmt));
    }

    #[test]
    fn valid_fragments_no_errors(input in prop::sample::select(VALID_FRAGMENTS)) {
        let result = Lexer::new(input, BASE).tokenize();
        prop_assert!(result.is_ok(), "{:?}: {:?}", input, result.errors);
    }
}
