//! printquote quote command - price a mesh upload.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use mesh_io::MeshFormat;
use print_quote::quote;

use crate::commands::analyze::print_analysis;
use crate::{Cli, OutputFormat, config, output, read_upload};

pub fn run(
    input: &Path,
    format: Option<MeshFormat>,
    settings_path: Option<&Path>,
    allow_oversized: bool,
    cli: &Cli,
) -> Result<()> {
    let mut settings = config::load_settings(settings_path)?;
    if allow_oversized {
        settings.reject_oversized_files = false;
    }

    let (bytes, format) = read_upload(input, format)?;
    let q = quote(&bytes, format, &settings)?;

    match cli.output {
        OutputFormat::Json => output::print(&q, cli.output, cli.quiet),
        OutputFormat::Text => {
            if q.build_volume.exceeds {
                output::warning(&q.build_volume.message(), cli.quiet);
            }
            if cli.quiet {
                return Ok(());
            }

            output::heading("Print Quote");
            output::field("File", input.display());
            output::field("Printer", &settings.printer_model);
            print_analysis(&q.analysis);

            println!();
            output::heading("Cost");
            let c = &q.cost;
            output::field("Material", format!("{:.2} ({:.2} g)", c.material_cost, c.material_grams));
            output::field("Machine time", format!("{:.2}", c.time_cost));
            output::field("Base fee", format!("{:.2}", c.base_fee));
            output::field("Subtotal", format!("{:.2}", c.subtotal));
            if c.minimum_charge_applied {
                output::field("Minimum charge", format!("{:.2}", settings.minimum_charge));
            }
            println!("  {}: {}", "Total".bold(), format!("{:.2}", c.total).bold());

            output::success(
                &format!("Quoted {} minor units", q.total_minor_units()),
                cli.quiet,
            );
        }
    }

    Ok(())
}
