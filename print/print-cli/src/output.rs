//! Shared output helpers for text and JSON modes.

use colored::Colorize;
use serde::Serialize;

use crate::OutputFormat;

/// Print a serializable result as pretty JSON, or its debug form in text mode.
pub fn print<T: Serialize + std::fmt::Debug>(value: &T, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("{}: failed to encode JSON: {e}", "Error".red().bold()),
        },
        OutputFormat::Text => println!("{value:#?}"),
    }
}

/// Print a section heading in text mode.
pub fn heading(title: &str) {
    println!("{}", title.bold().underline());
}

/// Print one `label: value` line in text mode.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {}: {value}", label.cyan());
}

/// Print a success line.
pub fn success(message: &str, quiet: bool) {
    if !quiet {
        println!("{} {message}", "✓".green().bold());
    }
}

/// Print a warning line to stderr.
pub fn warning(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}: {message}", "Warning".yellow().bold());
    }
}
