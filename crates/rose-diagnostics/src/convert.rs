// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from front-end error types to `Diagnostic`.
//!
//! The `ToDiagnostic` trait is implemented for every error type the lexer,
//! resolver and parser produce.

use rose_ast::{Pos, Span};
use rose_parser::ErrorKind;

use crate::codes::{LEXICAL, SEMANTIC, SYNTAX};
use crate::{Diagnostic, ToDiagnostic};

fn lex_label(message: &str) -> &'static str {
    if message.starts_with("illegal character") {
        "not valid here"
    } else {
        "malformed literal"
    }
}

// ============================================================================
// Lex Errors
// ============================================================================

impl ToDiagnostic for rose_lexer::LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(&self.message)
            .with_code(LEXICAL)
            .with_primary(self.span, lex_label(&self.message))
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for rose_parser::ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        if let Some(ref cause) = self.cause {
            return cause.to_diagnostic();
        }

        // Follow-up lines ("\tprevious declaration at ...") become notes.
        let mut lines = self.message.lines();
        let headline = lines.next().unwrap_or_default();
        let span = span_at(self.pos, 1);

        let (code, label) = match self.kind {
            ErrorKind::Lexical => (LEXICAL, lex_label(headline)),
            ErrorKind::Syntax => (SYNTAX, "here"),
            ErrorKind::Semantic => (SEMANTIC, semantic_label(headline)),
        };
        let mut diag = Diagnostic::error(headline).with_code(code).with_primary(span, label);

        for note in lines {
            diag = diag.with_note(note.trim());
        }
        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

fn semantic_label(message: &str) -> &'static str {
    if message.ends_with("redeclared in this block") {
        "redeclared here"
    } else if message.ends_with("is not a type") {
        "expected a type"
    } else if message == "extra init expr" {
        "no name for this value"
    } else {
        "in this declaration"
    }
}

// ============================================================================
// Resolve Errors
// ============================================================================

impl ToDiagnostic for rose_resolve::ResolveError {
    fn to_diagnostic(&self) -> Diagnostic {
        use rose_resolve::ResolveErrorKind::*;

        match &self.kind {
            Redeclared { name, previous } => {
                let mut diag = Diagnostic::error(self.to_string())
                    .with_code(SEMANTIC)
                    .with_primary(span_at(self.pos, name.len()), "redeclared here");
                if previous.is_valid() {
                    diag = diag.with_secondary(span_at(*previous, name.len()), "previous declaration here");
                }
                diag.with_help(format!("rename one of the `{name}` declarations"))
            }
        }
    }
}

/// Span of `len` bytes starting at `pos`, at least one byte wide.
pub fn span_at(pos: Pos, len: usize) -> Span {
    Span::new(pos, pos + len.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabelStyle;
    use rose_ast::Position;
    use rose_parser::ParseError;
    use rose_resolve::ResolveError;

    fn position(line: u32, column: u32) -> Position {
        Position {
            filename: "t.rose".into(),
            offset: column as usize - 1,
            line,
            column,
        }
    }

    #[test]
    fn lex_error_keeps_span() {
        let err = rose_lexer::LexError {
            span: Span::new(Pos(3), Pos(4)),
            message: "illegal character U+0040 '@'".into(),
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.code.as_ref().map(|c| c.0.as_str()), Some("E0001"));
        assert_eq!(diag.primary_span(), Some(Span::new(Pos(3), Pos(4))));
        assert_eq!(diag.labels[0].message.as_deref(), Some("not valid here"));
        assert_eq!(diag.help, None);
    }

    #[test]
    fn parse_error_codes_follow_kind() {
        let syntax = ParseError::new(position(1, 5), Pos(5), ErrorKind::Syntax, "expected operand");
        assert_eq!(syntax.to_diagnostic().code.map(|c| c.0), Some("E0100".into()));

        let semantic = ParseError::new(position(1, 1), Pos(1), ErrorKind::Semantic, "missing constant value");
        let diag = semantic.to_diagnostic();
        assert_eq!(diag.code.map(|c| c.0), Some("E0200".into()));
        assert_eq!(diag.labels[0].message.as_deref(), Some("in this declaration"));
    }

    #[test]
    fn redeclaration_note_is_split_off() {
        let err = ParseError::new(
            position(2, 5),
            Pos(15),
            ErrorKind::Semantic,
            "a redeclared in this block\n\tprevious declaration at t.rose:1:5",
        );
        let diag = err.to_diagnostic();
        assert_eq!(diag.message, "a redeclared in this block");
        assert_eq!(diag.notes, vec!["previous declaration at t.rose:1:5"]);
        assert_eq!(diag.labels[0].message.as_deref(), Some("redeclared here"));
    }

    #[test]
    fn redeclaration_labels_both_declarations() {
        let result = rose_parser::parse("var abc = 1\nvar abc = 2");
        let diag = result.errors[0].to_diagnostic();
        assert_eq!(diag.message, "abc redeclared in this block");
        assert_eq!(diag.code.as_ref().map(|c| c.0.as_str()), Some("E0200"));
        assert_eq!(diag.labels[0].style, LabelStyle::Primary);
        assert_eq!(diag.labels[0].span, Span::new(Pos(17), Pos(20)));
        assert_eq!(diag.labels[1].style, LabelStyle::Secondary);
        assert_eq!(diag.labels[1].span, Span::new(Pos(5), Pos(8)));
        assert!(diag.notes.is_empty());
    }

    #[test]
    fn resolve_error_points_at_both_declarations() {
        let err = ResolveError::redeclared("abc".into(), Pos(20), Pos(5));
        let diag = err.to_diagnostic();
        assert_eq!(diag.message, "abc redeclared in this block");
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.labels[0].span, Span::new(Pos(20), Pos(23)));
        assert_eq!(diag.labels[1].style, LabelStyle::Secondary);
        assert_eq!(diag.labels[1].span, Span::new(Pos(5), Pos(8)));
    }

    #[test]
    fn span_at_is_never_empty() {
        assert_eq!(span_at(Pos(4), 0), Span::new(Pos(4), Pos(5)));
        assert_eq!(span_at(Pos(4), 3), Span::new(Pos(4), Pos(7)));
    }
}
