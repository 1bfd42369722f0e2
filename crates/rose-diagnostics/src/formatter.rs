// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rich terminal formatter for diagnostics.
//!
//! Produces multi-line, color-coded error output:
//!
//! ```text
//! error[E0200]: a redeclared in this block
//!   --> main.rose:2:5
//!     |
//!   1 | var a = 1
//!     |     - previous declaration here
//!   2 | var a = 2
//!     |     ^ redeclared here
//!     |
//!     = help: rename one of the `a` declarations
//! ```

use std::collections::BTreeMap;

use colored::Colorize;

use rose_ast::{Pos, SourceFile};

use crate::{Diagnostic, LabelStyle, Severity};

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file: &'a SourceFile,
}

/// A source line with its labels.
struct AnnotatedLine {
    line_num: usize,
    text: String,
    annotations: Vec<Annotation>,
}

struct Annotation {
    col_start: usize,
    col_end: usize,
    style: LabelStyle,
    message: Option<String>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(file: &'a SourceFile, source: &'a str) -> Self {
        Self { source, file }
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();

        // Line 1: severity[code]: message
        self.format_header(&mut out, diagnostic);

        // Group labels by source line
        let annotated = self.collect_annotated_lines(diagnostic);
        if annotated.is_empty() {
            // No source context, just print notes/help
            self.format_footer(&mut out, diagnostic);
            return out;
        }

        // Line 2: --> file:line:col
        if let Some(span) = diagnostic.primary_span() {
            let file = match self.file.name() {
                "" => "<source>",
                name => name,
            };
            if let Some((line, col)) = self.line_col(span.start) {
                out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue(), file, line, col));
            }
        }

        // Calculate gutter width from max line number
        let max_line = annotated.last().map(|a| a.line_num).unwrap_or(1);
        let gutter_width = max_line.to_string().len().max(2);

        let mut prev_line_num: Option<usize> = None;
        for annotated_line in &annotated {
            // Gap indicator for non-consecutive lines
            if let Some(prev) = prev_line_num {
                if annotated_line.line_num > prev + 1 {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width), "...".blue()));
                }
            }

            // Empty pipe line before first source line
            if prev_line_num.is_none() {
                out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));
            }

            // Source line: NN | code
            out.push_str(&format!(
                "{:>width$} {} {}\n",
                annotated_line.line_num.to_string().blue().bold(),
                "|".blue(),
                annotated_line.text,
                width = gutter_width + 1,
            ));

            self.format_annotations(&mut out, annotated_line, gutter_width);

            prev_line_num = Some(annotated_line.line_num);
        }

        if !diagnostic.notes.is_empty() || diagnostic.help.is_some() {
            out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));
        }
        self.format_footer(&mut out, diagnostic);

        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity_str = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
        };

        if let Some(ref code) = diagnostic.code {
            out.push_str(&format!(
                "{}[{}]: {}\n",
                severity_str,
                code.0.clone().red().bold(),
                diagnostic.message.bold()
            ));
        } else {
            out.push_str(&format!("{}: {}\n", severity_str, diagnostic.message.bold()));
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic) {
        let indent = " ".repeat(3);

        for note in &diagnostic.notes {
            out.push_str(&format!("{} {} {}: {}\n", indent, "=".cyan(), "note".cyan().bold(), note));
        }

        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!("{} {} {}: {}\n", indent, "=".cyan(), "help".cyan().bold(), help));
        }
    }

    fn collect_annotated_lines(&self, diagnostic: &Diagnostic) -> Vec<AnnotatedLine> {
        let mut lines_map: BTreeMap<usize, AnnotatedLine> = BTreeMap::new();

        for label in &diagnostic.labels {
            let Some((line_num, col_start)) = self.line_col(label.span.start) else {
                continue;
            };
            let text = self.get_line(line_num).unwrap_or("");

            // Multi-line spans and spans past EOF stop at the end of the line
            let col_end = match self.line_col(label.span.end) {
                Some((end_line, col_end)) if end_line == line_num => col_end,
                _ => text.len() + 1,
            };

            let entry = lines_map.entry(line_num).or_insert_with(|| AnnotatedLine {
                line_num,
                text: text.to_string(),
                annotations: Vec::new(),
            });

            entry.annotations.push(Annotation {
                col_start,
                col_end: col_end.max(col_start + 1), // At least 1 char wide
                style: label.style,
                message: label.message.clone(),
            });
        }

        lines_map.into_values().collect()
    }

    fn format_annotations(&self, out: &mut String, annotated_line: &AnnotatedLine, gutter_width: usize) {
        // Sort annotations: primary first, then by column
        let mut sorted: Vec<&Annotation> = annotated_line.annotations.iter().collect();
        sorted.sort_by(|a, b| {
            a.style
                .cmp_priority()
                .cmp(&b.style.cmp_priority())
                .then(a.col_start.cmp(&b.col_start))
        });

        // Build the underline characters
        let line_len = sorted
            .iter()
            .map(|a| a.col_end)
            .max()
            .unwrap_or(0)
            .max(annotated_line.text.len() + 1);
        let mut underline = vec![' '; line_len];
        let mut messages: Vec<(usize, LabelStyle, &str)> = Vec::new();

        for ann in &sorted {
            let ch = match ann.style {
                LabelStyle::Primary => '^',
                LabelStyle::Secondary => '-',
            };

            for slot in underline.iter_mut().take(ann.col_end - 1).skip(ann.col_start - 1) {
                *slot = ch;
            }

            if let Some(ref msg) = ann.message {
                messages.push((ann.col_start, ann.style, msg));
            }
        }

        let underline_str: String = underline.iter().collect::<String>().trim_end().to_string();
        if underline_str.is_empty() {
            return;
        }

        let colored_underline = color_underline(&underline_str);
        let pad = " ".repeat(gutter_width + 1);

        // A single message goes inline after the underline
        if messages.len() <= 1 {
            match messages.first() {
                Some((_, style, msg)) => {
                    out.push_str(&format!("{} {} {} {}\n", pad, "|".blue(), colored_underline, styled(msg, *style)));
                }
                None => out.push_str(&format!("{} {} {}\n", pad, "|".blue(), colored_underline)),
            }
            return;
        }

        // Multiple annotations: underline first, then messages on separate lines
        out.push_str(&format!("{} {} {}\n", pad, "|".blue(), colored_underline));
        for (col, style, msg) in messages.iter().rev() {
            let pipe = match style {
                LabelStyle::Primary => "|".red().bold().to_string(),
                LabelStyle::Secondary => "|".blue().to_string(),
            };
            out.push_str(&format!(
                "{} {} {}{} {}\n",
                pad,
                "|".blue(),
                " ".repeat(col.saturating_sub(1)),
                pipe,
                styled(msg, *style),
            ));
        }
    }

    /// 1-based line and column of `pos`, if it lies in this file.
    fn line_col(&self, pos: Pos) -> Option<(usize, usize)> {
        let position = self.file.position(pos);
        position
            .is_valid()
            .then_some((position.line as usize, position.column as usize))
    }

    /// Get source line text by 1-based line number.
    fn get_line(&self, line_num: usize) -> Option<&str> {
        self.file.line_text(self.source, line_num as u32)
    }
}

impl LabelStyle {
    fn cmp_priority(&self) -> u8 {
        match self {
            LabelStyle::Primary => 0,
            LabelStyle::Secondary => 1,
        }
    }
}

fn styled(msg: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Primary => msg.red().bold().to_string(),
        LabelStyle::Secondary => msg.blue().to_string(),
    }
}

/// Color the underline characters (^ in red, - in blue).
fn color_underline(s: &str) -> String {
    let mut result = String::new();
    let mut current_char = None;
    let mut run = String::new();

    for ch in s.chars() {
        let kind = match ch {
            '^' => Some('^'),
            '-' => Some('-'),
            _ => None,
        };

        if kind != current_char && !run.is_empty() {
            result.push_str(&flush_run(&run, current_char));
            run.clear();
        }
        run.push(ch);
        current_char = kind;
    }

    if !run.is_empty() {
        result.push_str(&flush_run(&run, current_char));
    }

    result
}

fn flush_run(run: &str, kind: Option<char>) -> String {
    match kind {
        Some('^') => run.red().bold().to_string(),
        Some('-') => run.blue().to_string(),
        _ => run.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::span_at;

    fn plain<F: FnOnce() -> String>(f: F) -> String {
        colored::control::set_override(false);
        f()
    }

    #[test]
    fn single_label_snippet() {
        let src = "var a = 1 +\n";
        let file = SourceFile::new("main.rose", 1, src).unwrap();
        let diag = Diagnostic::error("expected operand, found newline")
            .with_code("E0100")
            .with_primary(span_at(file.pos(11), 1), "here")
            .with_help("the expression is incomplete");
        let out = plain(|| DiagnosticFormatter::new(&file, src).format(&diag));
        let expected = "\
error[E0100]: expected operand, found newline
  --> main.rose:1:12
    |
  1 | var a = 1 +
    |            ^ here
    |
    = help: the expression is incomplete
";
        assert_eq!(out, expected);
    }

    #[test]
    fn labels_on_two_lines() {
        let src = "var a = 1\nvar a = 2";
        let file = SourceFile::new("main.rose", 1, src).unwrap();
        let diag = Diagnostic::error("a redeclared in this block")
            .with_primary(span_at(file.pos(14), 1), "redeclared here")
            .with_secondary(span_at(file.pos(4), 1), "previous declaration here");
        let out = plain(|| DiagnosticFormatter::new(&file, src).format(&diag));
        assert!(out.starts_with("error: a redeclared in this block\n  --> main.rose:2:5\n"));
        assert!(out.contains("  1 | var a = 1\n    |     - previous declaration here\n"));
        assert!(out.contains("  2 | var a = 2\n    |     ^ redeclared here\n"));
    }

    #[test]
    fn no_labels_prints_footer_only() {
        let file = SourceFile::new("", 1, "").unwrap();
        let diag = Diagnostic::error("too many errors").with_note("parse aborted");
        let out = plain(|| DiagnosticFormatter::new(&file, "").format(&diag));
        assert_eq!(out, "error: too many errors\n    = note: parse aborted\n");
    }
}
