// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON diagnostic output for machine consumption.
//!
//! Produces structured JSON that editors and scripts can parse. Each
//! diagnostic includes source context and exact locations (line/col).
//!
//! Use `--format json` with `rose lex` or `rose parse` to get this output.

use serde::Serialize;

use rose_ast::{Pos, SourceFile};

use crate::{codes::ErrorCodeRegistry, Diagnostic, LabelStyle, Severity};

/// A complete JSON diagnostic report for one run over one file.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The file that was processed.
    pub file: String,
    /// Whether the phase succeeded (no errors).
    pub success: bool,
    /// The phase that produced these diagnostics ("lex" or "parse").
    pub phase: String,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
}

/// A single diagnostic in JSON form, enriched with source context.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Severity: "error".
    pub severity: String,
    /// Error code (e.g., "E0100").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error category (e.g., "Syntax").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    /// Primary source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub labels: Vec<JsonLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A source location with line/column (1-based).
#[derive(Debug, Serialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub byte_offset: usize,
    /// The source line text for context.
    pub source_line: String,
}

/// A labeled span in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonLabel {
    /// "primary" or "secondary".
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub start: LineCol,
    pub end: LineCol,
}

/// Line/column pair (1-based).
#[derive(Debug, Serialize)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
    pub byte_offset: usize,
}

/// Convert diagnostics to a structured JSON report.
pub fn to_json_report(diagnostics: &[Diagnostic], file: &SourceFile, source: &str, phase: &str) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let error_count = diagnostics.iter().filter(|d| d.severity == Severity::Error).count();

    let json_diags: Vec<JsonDiagnostic> = diagnostics
        .iter()
        .map(|d| to_json_diagnostic(d, file, source, &registry))
        .collect();

    DiagnosticReport {
        version: 1,
        file: file.name().to_string(),
        success: error_count == 0,
        phase: phase.to_string(),
        diagnostics: json_diags,
        error_count,
    }
}

fn to_json_diagnostic(diag: &Diagnostic, file: &SourceFile, source: &str, registry: &ErrorCodeRegistry) -> JsonDiagnostic {
    let code = diag.code.as_ref().map(|c| c.0.clone());
    let category = code
        .as_ref()
        .and_then(|c| registry.get(c))
        .map(|info| info.category.to_string());

    let location = diag.primary_span().and_then(|span| {
        let position = file.position(span.start);
        position.is_valid().then(|| SourceLocation {
            line: position.line,
            column: position.column,
            byte_offset: position.offset,
            source_line: file.line_text(source, position.line).unwrap_or("").to_string(),
        })
    });

    let labels = diag
        .labels
        .iter()
        .map(|l| JsonLabel {
            role: match l.style {
                LabelStyle::Primary => "primary".to_string(),
                LabelStyle::Secondary => "secondary".to_string(),
            },
            message: l.message.clone(),
            start: line_col(file, l.span.start),
            end: line_col(file, l.span.end),
        })
        .collect();

    JsonDiagnostic {
        severity: diag.severity.as_str().to_string(),
        code,
        category,
        message: diag.message.clone(),
        location,
        labels,
        notes: diag.notes.clone(),
        help: diag.help.clone(),
    }
}

/// Line and column of `pos`. Positions just past the end clamp to EOF.
fn line_col(file: &SourceFile, pos: Pos) -> LineCol {
    let clamped = file.pos(file.offset(pos));
    let position = file.position(clamped);
    LineCol {
        line: position.line,
        column: position.column,
        byte_offset: position.offset,
    }
}

/// Serialize a diagnostic report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::span_at;

    #[test]
    fn report_counts_and_locations() {
        let src = "var a\nvar b = 1 +";
        let file = SourceFile::new("main.rose", 1, src).unwrap();
        let diags = vec![
            Diagnostic::error("missing variable type or initialization")
                .with_code("E0200")
                .with_primary(span_at(file.pos(4), 1), "in this declaration"),
            Diagnostic::error("expected operand, found 'EOF'")
                .with_code("E0100")
                .with_primary(span_at(file.pos(src.len()), 1), "here")
                .with_help("the expression is incomplete"),
        ];
        let report = to_json_report(&diags, &file, src, "parse");
        assert!(!report.success);
        assert_eq!(report.error_count, 2);
        assert_eq!(report.file, "main.rose");

        let first = &report.diagnostics[0];
        assert_eq!(first.category.as_deref(), Some("Declaration"));
        let loc = first.location.as_ref().unwrap();
        assert_eq!((loc.line, loc.column), (1, 5));
        assert_eq!(loc.source_line, "var a");

        let second = &report.diagnostics[1];
        let loc = second.location.as_ref().unwrap();
        assert_eq!((loc.line, loc.column), (2, 12));
        // The end of a span at EOF clamps to EOF
        assert_eq!(second.labels[0].end.column, 12);
    }

    #[test]
    fn json_string_omits_empty_fields() {
        let file = SourceFile::new("x.rose", 1, "").unwrap();
        let report = to_json_report(&[], &file, "", "lex");
        let json = to_json_string(&report);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["phase"], "lex");
        assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(0));
    }
}
