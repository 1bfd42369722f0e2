// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rose CLI - front-end inspection tool.

mod commands;
mod help;
mod output;

use rose_ast::SourceFile;
use rose_diagnostics::formatter::DiagnosticFormatter;
use rose_diagnostics::{json, Diagnostic};
use rose_parser::ParseOptions;
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::phase::{cmd_lex, cmd_parse};
use help::print_usage;

/// How diagnostics and results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

/// Print diagnostics for one phase. Human output goes to stderr; the JSON
/// report goes to stdout and is printed even when there is nothing to report.
pub fn show_diagnostics(diags: &[Diagnostic], file: &SourceFile, source: &str, phase: &str, format: Format) {
    match format {
        Format::Human => {
            let formatter = DiagnosticFormatter::new(file, source);
            for diag in diags {
                eprint!("{}", formatter.format(diag));
                eprintln!();
            }
        }
        Format::Json => {
            let report = json::to_json_report(diags, file, source, phase);
            println!("{}", json::to_json_string(&report));
        }
    }
}

/// Options shared by every phase command.
struct CommandArgs {
    path: String,
    format: Format,
    all_errors: bool,
}

fn parse_command_args(cmd: &str, rest: &[String]) -> Result<CommandArgs, String> {
    let mut path = None;
    let mut format = Format::Human;
    let mut all_errors = false;

    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--format" => {
                format = match iter.next().map(String::as_str) {
                    Some("human") => Format::Human,
                    Some("json") => Format::Json,
                    Some(other) => return Err(format!("unknown format '{}' (expected human or json)", other)),
                    None => return Err("--format needs a value".to_string()),
                };
            }
            "--json" => format = Format::Json,
            "--all-errors" | "-e" => all_errors = true,
            flag if flag.starts_with('-') => return Err(format!("unknown flag '{}'", flag)),
            file => {
                if path.is_some() {
                    return Err(format!("{} takes a single file", cmd));
                }
                path = Some(file.to_string());
            }
        }
    }

    let path = path.ok_or_else(|| format!("Usage: rose {} <file.rose> [--format human|json] [--all-errors]", cmd))?;
    Ok(CommandArgs { path, format, all_errors })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    output::init();
    init_tracing();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        cmd @ ("lex" | "parse") => {
            let parsed = match parse_command_args(cmd, &args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("{}: {}", output::error_label(), msg);
                    process::exit(1);
                }
            };
            if cmd == "lex" {
                cmd_lex(&parsed.path, parsed.format);
            } else {
                let options = ParseOptions {
                    all_errors: parsed.all_errors,
                };
                cmd_parse(&parsed.path, parsed.format, options);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("rose {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            // Treat as filename
            if other.ends_with(".rose") {
                cmd_parse(other, Format::Human, ParseOptions::default());
            } else {
                eprintln!("Unknown command: {}", other);
                print_usage();
                process::exit(1);
            }
        }
    }
}
