//! printquote settings command - show effective settings.

use std::path::Path;

use anyhow::Result;

use crate::{Cli, OutputFormat, config, output};

pub fn run(settings_path: Option<&Path>, cli: &Cli) -> Result<()> {
    let s = config::load_settings(settings_path)?;

    match cli.output {
        OutputFormat::Json => output::print(&s, cli.output, cli.quiet),
        OutputFormat::Text => {
            if cli.quiet {
                return Ok(());
            }
            let b = s.build_volume;
            output::heading("Print Settings");
            output::field(
                "Source",
                settings_path.map_or_else(|| "defaults".to_string(), |p| p.display().to_string()),
            );
            output::field("Printer", &s.printer_model);
            output::field("Build volume", format!("{} x {} x {} mm", b.x, b.y, b.z));
            output::field("Layer height", format!("{} mm", s.default_layer_height));
            output::field("Infill", format!("{} %", s.default_infill));
            output::field("Print speed", format!("{} mm/s", s.print_speed));
            output::field("Material density", format!("{} g/cm³", s.material_density));
            output::field("Base order fee", format!("{:.2}", s.base_order_fee));
            output::field("Price per gram", format!("{:.3}", s.price_per_gram));
            output::field("Machine rate", format!("{:.2} / h", s.hourly_machine_rate));
            output::field("Minimum charge", format!("{:.2}", s.minimum_charge));
            output::field(
                "Oversized files",
                if s.reject_oversized_files { "rejected" } else { "priced" },
            );
            output::field("Max file size", format!("{} MB", s.max_file_size_mb));
        }
    }

    Ok(())
}
