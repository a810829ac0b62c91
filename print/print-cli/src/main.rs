//! printquote: command-line front end for the print quote pipeline.
//!
//! Inspects, analyzes and prices mesh uploads the same way the storefront
//! does, for support staff and for scripting.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=print_quote=info` - Pipeline milestones
//! - `RUST_LOG=mesh_io=debug` - Parse details
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! # Quote with the default settings
//! printquote quote part.stl
//!
//! # Quote with the shop's settings document, JSON output
//! printquote --output json quote part.stl --settings shop.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use mesh_io::MeshFormat;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod config;
mod output;

use commands::{analyze, inspect, quote, settings};

/// printquote - Estimate 3D print time and cost from mesh files.
#[derive(Parser)]
#[command(name = "printquote")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    output: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a mesh file without decoding its geometry
    Inspect {
        /// Input mesh file
        input: PathBuf,
    },

    /// Measure a mesh and estimate its print time
    Analyze {
        /// Input mesh file
        input: PathBuf,

        /// Mesh format (stl, binary-stl, ascii-stl, 3mf, obj); default from extension
        #[arg(long)]
        format: Option<MeshFormat>,

        /// Settings document (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// Analyze, check build volume and price a mesh
    Quote {
        /// Input mesh file
        input: PathBuf,

        /// Mesh format (stl, binary-stl, ascii-stl, 3mf, obj); default from extension
        #[arg(long)]
        format: Option<MeshFormat>,

        /// Settings document (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Price models that exceed the build volume instead of rejecting them
        #[arg(long)]
        allow_oversized: bool,
    },

    /// Show the effective print settings
    Settings {
        /// Settings document (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "print_quote=info,print_cost=info,mesh_measure=info,mesh_io=info",
            2 => "print_quote=debug,print_cost=debug,mesh_measure=debug,mesh_io=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

/// Read an upload and resolve its format.
fn read_upload(input: &Path, format: Option<MeshFormat>) -> Result<(Vec<u8>, MeshFormat)> {
    let format = match format {
        Some(format) => format,
        None => MeshFormat::from_path(input)
            .with_context(|| format!("Cannot tell the mesh format of {}", input.display()))?,
    };
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    Ok((bytes, format))
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Inspect { input } => inspect::run(input, &cli),
        Commands::Analyze {
            input,
            format,
            settings,
        } => analyze::run(input, *format, settings.as_deref(), &cli),
        Commands::Quote {
            input,
            format,
            settings,
            allow_oversized,
        } => quote::run(input, *format, settings.as_deref(), *allow_oversized, &cli),
        Commands::Settings { settings: path } => settings::run(path.as_deref(), &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            if let Some(quote_err) = e.downcast_ref::<print_quote::QuoteError>() {
                let message = quote_err.user_message();
                eprintln!("{}: {}", "Error".red().bold(), message);
                let details = quote_err.to_string();
                if details != message {
                    eprintln!("  {}: {}", "Details".cyan(), details);
                }
            } else {
                eprintln!("{}: {}", "Error".red().bold(), e);
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            }
        }
        std::process::exit(1);
    }
}
