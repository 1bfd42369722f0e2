// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Front-end phase inspection commands: lex, parse.

use rose_ast::{FileSet, SourceFile, ToSexp};
use rose_diagnostics::{Diagnostic, ToDiagnostic};
use rose_parser::{ParseOptions, Parser};
use std::fs;
use std::process;
use std::sync::Arc;
use tracing::debug;

use crate::{output, show_diagnostics, Format};

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: reading {}: {}", output::error_label(), path, e);
            process::exit(1);
        }
    }
}

fn register(fset: &mut FileSet, path: &str, source: &str) -> Arc<SourceFile> {
    match fset.add_file(path, source) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("{}: {}", output::error_label(), e);
            process::exit(1);
        }
    }
}

pub fn cmd_lex(path: &str, format: Format) {
    let source = read_source(path);
    let mut fset = FileSet::new();
    let file = register(&mut fset, path, &source);

    let mut lexer = rose_lexer::Lexer::new(&source, file.base());
    let result = lexer.tokenize();
    debug!(tokens = result.tokens.len(), errors = result.errors.len(), "lexed {}", path);

    let diags: Vec<Diagnostic> = result.errors.iter().map(|e| e.to_diagnostic()).collect();
    show_diagnostics(&diags, &file, &source, "lex", format);

    if format == Format::Human {
        println!("{}\n", output::section("Tokens", result.tokens.len()));
        for tok in &result.tokens {
            println!("{}", output::token_line(&file.position(tok.pos()), tok));
        }
    }

    if result.is_ok() {
        if format == Format::Human {
            println!("\n{}", output::phase_result("Lex", 0));
        }
    } else {
        if format == Format::Human {
            eprintln!("\n{}", output::phase_result("Lex", result.errors.len()));
        }
        process::exit(1);
    }
}

pub fn cmd_parse(path: &str, format: Format, options: ParseOptions) {
    let source = read_source(path);
    let mut fset = FileSet::new();
    let file = register(&mut fset, path, &source);

    let result = Parser::new(&file, &source, options).parse_file();
    debug!(
        stmts = result.file.stmts.len(),
        errors = result.errors.len(),
        "parsed {}",
        path
    );

    let diags: Vec<Diagnostic> = result.errors.iter().map(|e| e.to_diagnostic()).collect();
    show_diagnostics(&diags, &file, &source, "parse", format);

    if !result.is_ok() {
        if format == Format::Human {
            eprintln!("\n{}", output::phase_result("Parse", diags.len()));
        }
        process::exit(1);
    }

    if format == Format::Human {
        println!("{}\n", output::section("Statements", result.file.stmts.len()));
        for stmt in &result.file.stmts {
            println!("{}", stmt.to_sexp());
        }

        if !result.objects.is_empty() {
            println!("\n{}\n", output::section("Objects", result.objects.len()));
            for obj in result.objects.iter() {
                println!("{}", output::object_line(obj.kind.as_str(), &obj.name, &file.position(obj.pos)));
            }
        }

        if !result.file.unresolved.is_empty() {
            println!("\n{}\n", output::section("Unresolved", result.file.unresolved.len()));
            for ident in &result.file.unresolved {
                println!("{}", output::unresolved_line(&ident.name, &file.position(ident.pos)));
            }
        }

        println!("\n{}", output::phase_result("Parse", 0));
    }
}
