// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Help text for CLI commands.

use colored::Colorize;

/// Commands with their argument and description.
const COMMANDS: &[(&str, &str, &str)] = &[
    ("lex", "<file>", "Tokenize a file and print tokens"),
    ("parse", "<file>", "Parse a file and print the syntax tree"),
    ("help", "", "Show this help"),
    ("version", "", "Show version"),
];

const OPTIONS: &[(&str, &str)] = &[
    ("--format <fmt>", "Output format: human (default) or json"),
    ("--all-errors", "Report every error, not just the first per line"),
];

const ENVIRONMENT: &[(&str, &str)] = &[
    ("RUST_LOG", "Log filter for tracing output (e.g. rose_parser=trace)"),
    ("NO_COLOR", "Disable colored output"),
];

pub fn print_usage() {
    println!(
        "{} {} - Rose language front end",
        "Rose".bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!();
    println!(
        "{}: {} {} {}",
        "Usage".yellow().bold(),
        "rose".green(),
        "<command>".cyan(),
        "[args]".cyan()
    );
    println!();
    println!("{}", "Commands:".yellow().bold());
    for (name, arg, about) in COMMANDS {
        let padding = " ".repeat(16usize.saturating_sub(name.len() + arg.len() + 1));
        println!("  {} {}{padding}{about}", name.green(), arg.cyan());
    }
    println!();
    println!("{}", "Options:".yellow().bold());
    for (flag, about) in OPTIONS {
        println!("  {:<16} {about}", flag.cyan());
    }
    println!();
    println!("{}", "Environment:".yellow().bold());
    for (var, about) in ENVIRONMENT {
        println!("  {:<16} {about}", var.cyan());
    }
}
