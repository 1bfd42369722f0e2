// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Property-based tests for the parser.
//!
//! 1. **Parser never panics** and always terminates, on arbitrary text and
//!    on token soup built from real Rose spellings
//! 2. **Diagnostics are sorted** by position
//! 3. **Precedence**: a tighter operator on the right nests deeper
//! 4. **Exponent chains** are right-associative
//! 5. **Grouping**: a fully parenthesized tree parses to the same shape as
//!    the tree it was printed from

use proptest::prelude::*;
use rose_ast::decl::DeclKind;
use rose_ast::expr::{Expr, ExprKind};
use rose_ast::stmt::StmtKind;
use rose_ast::ToSexp;

use crate::{parse, parse_with, ParseOptions};

const WORDS: &[&str] = &[
    "var", "let", "const", "if", "return", "a", "b", "_", "1", "2.5", "'c'", "\"s\"", "(", ")", "=", "+=", "+", "-", "*",
    "**", "and", "or", "not", "==", ",", ";", "\n", "++", "@", "`r`",
];

const OPERANDS: &[&str] = &["a", "b", "c", "d", "1", "2.5", "'x'", "\"s\""];

/// Binary operators with their precedence.
const BINARY_OPS: &[(&str, u8)] = &[
    ("or", 1),
    ("and", 2),
    ("==", 3),
    ("<", 3),
    ("+", 4),
    ("-", 4),
    ("|", 4),
    ("*", 5),
    ("/", 5),
    ("<<", 5),
    ("&^", 5),
    ("**", 6),
];

fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..60).prop_map(|words| words.join(" "))
}

fn operand() -> impl Strategy<Value = String> {
    prop::sample::select(OPERANDS).prop_map(str::to_string)
}

/// Two operators, the second binding tighter than the first.
fn increasing_pair() -> impl Strategy<Value = (&'static str, &'static str)> {
    (prop::sample::select(BINARY_OPS), prop::sample::select(BINARY_OPS))
        .prop_filter("second operator must bind tighter", |((_, p1), (_, p2))| p1 < p2)
        .prop_map(|((op1, _), (op2, _))| (op1, op2))
}

/// A random expression tree as (fully parenthesized source, S-expression).
fn expr_tree() -> impl Strategy<Value = (String, String)> {
    let leaf = operand().prop_map(|x| (x.clone(), x));
    leaf.prop_recursive(4, 32, 2, |inner| {
        (inner.clone(), prop::sample::select(BINARY_OPS), inner).prop_map(|((ls, lx), (op, _), (rs, rx))| {
            (format!("({ls} {op} {rs})"), format!("({op} {lx} {rx})"))
        })
    })
}

/// Render `expr` as an S-expression, skipping grouping parentheses.
fn bare_sexp(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Paren { expr, .. } => bare_sexp(expr),
        ExprKind::Binary { lhs, op, rhs, .. } => {
            format!("({} {} {})", op.as_str(), bare_sexp(lhs), bare_sexp(rhs))
        }
        ExprKind::Unary { op, operand, .. } => format!("({} {})", op.as_str(), bare_sexp(operand)),
        _ => expr.to_sexp(),
    }
}

/// Parse `var x = <src>` and return the initializer, if the parse was clean.
fn init_expr(src: &str) -> Option<Expr> {
    let result = parse(&format!("var x = {src}"));
    if !result.is_ok() {
        return None;
    }
    let StmtKind::Decl(decl) = &result.file.stmts.first()?.kind else {
        return None;
    };
    let DeclKind::Gen(g) = &decl.kind else {
        return None;
    };
    g.specs.first()?.values.first().cloned()
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
    fn parser_never_panics(input in "\\PC{0,300}") {
        let _ = parse(&input);
    }

    #[test]
    fn token_soup_terminates(input in token_soup()) {
        let _ = parse(&input);
        let _ = parse_with(&input, ParseOptions { all_errors: true });
    }

    #[test]
    fn diagnostics_are_sorted(input in token_soup()) {
        let result = parse_with(&input, ParseOptions { all_errors: true });
        for pair in result.errors.windows(2) {
            prop_assert!(pair[0].pos <= pair[1].pos);
        }
    }

    #[test]
    fn capped_parse_keeps_few_errors(input in token_soup()) {
        let result = parse(&input);
        prop_assert!(result.errors.len() <= 11, "{} errors", result.errors.len());
    }

    #[test]
    fn tighter_operator_nests_deeper((op1, op2) in increasing_pair()) {
        let expr = init_expr(&format!("a {op1} b {op2} c"));
        prop_assert!(expr.is_some());
        prop_assert_eq!(expr.map(|e| e.to_sexp()), Some(format!("({op1} a ({op2} b c))")));
    }

    #[test]
    fn exponent_chains_nest_right(n in 2usize..8) {
        let names: Vec<String> = (0..n).map(|i| format!("x{i}")).collect();
        let mut expected = names[n - 1].clone();
        for name in names[..n - 1].iter().rev() {
            expected = format!("(** {name} {expected})");
        }
        let expr = init_expr(&names.join(" ** "));
        prop_assert_eq!(expr.map(|e| e.to_sexp()), Some(expected));
    }

    #[test]
    fn parenthesized_tree_round_trips((src, sexp) in expr_tree()) {
        let expr = init_expr(&src);
        prop_assert!(expr.is_some(), "failed to parse {}", src);
        prop_assert_eq!(expr.map(|e| bare_sexp(&e)), Some(sexp));
    }
}
