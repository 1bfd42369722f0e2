// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use rose_ast::token::TokenKind;

/// Get a hint for an "expected X" error based on what was found instead.
pub fn for_expected(expected: &str, found: TokenKind) -> Option<&'static str> {
    match (expected, found) {
        // Parentheses
        ("')'", TokenKind::Eof) => Some("add ')' to close the parenthesis"),
        ("')'", TokenKind::Semi) => Some("add ')' before the end of the line"),
        ("')'", _) => None,

        // Operands
        ("operand", TokenKind::Eof | TokenKind::Semi) => Some("the expression is incomplete"),
        ("operand", TokenKind::Assign) => Some("put the value after '='"),
        ("operand", _) => Some("try a name, a literal, or a parenthesized expression"),

        // Comparison written as assignment
        ("'=='", TokenKind::Assign) => Some("use '==' to compare values"),

        // Names
        ("'IDENT'", TokenKind::Int | TokenKind::Float) => Some("names can't start with a number"),
        ("'IDENT'", t) if t.is_keyword() => Some("keywords can't be used as names"),
        ("'IDENT'", _) => Some("names start with a letter or '_'"),

        // Types
        ("type", _) => Some("try a type like 'int', 'string', or 'bool'"),

        // Statements
        ("statement", _) => Some("statements start with 'const', 'let', 'var', or an expression"),
        ("1 expression", _) => Some("only assignments may list several expressions"),

        // Statement terminator
        ("';'", _) => Some("end statements with a newline or ';'"),

        _ => None,
    }
}

/// Get a hint for a declaration-shape error.
pub fn for_declaration(message: &str) -> Option<&'static str> {
    match message {
        "missing variable type or initialization" => Some("write 'var x int' or 'var x = value'"),
        "missing initialization" => Some("give every name a value after '='"),
        "missing constant value" => Some("constants need a value: 'const x = 1'"),
        "extra init expr" => Some("there are more values than names"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_specific_hints() {
        assert_eq!(for_expected("')'", TokenKind::Eof), Some("add ')' to close the parenthesis"));
        assert_eq!(for_expected("operand", TokenKind::Eof), Some("the expression is incomplete"));
        assert_eq!(for_expected("')'", TokenKind::Ident), None);
    }

    #[test]
    fn name_hints() {
        assert_eq!(for_expected("'IDENT'", TokenKind::Int), Some("names can't start with a number"));
        assert_eq!(for_expected("'IDENT'", TokenKind::Var), Some("keywords can't be used as names"));
    }

    #[test]
    fn unknown_is_none() {
        assert_eq!(for_expected("something else", TokenKind::Eof), None);
        assert_eq!(for_declaration("x redeclared in this block"), None);
    }
}
