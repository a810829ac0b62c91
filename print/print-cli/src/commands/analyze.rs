//! printquote analyze command - measure a mesh and estimate print time.

use std::path::Path;

use anyhow::Result;
use mesh_io::MeshFormat;
use print_quote::{AnalysisResult, analyze_mesh};

use crate::{Cli, OutputFormat, config, output, read_upload};

pub fn run(
    input: &Path,
    format: Option<MeshFormat>,
    settings_path: Option<&Path>,
    cli: &Cli,
) -> Result<()> {
    let settings = config::load_settings(settings_path)?;
    let (bytes, format) = read_upload(input, format)?;
    let result = analyze_mesh(&bytes, format, &settings)?;

    match cli.output {
        OutputFormat::Json => output::print(&result, cli.output, cli.quiet),
        OutputFormat::Text => {
            if !cli.quiet {
                output::heading("Mesh Analysis");
                output::field("File", input.display());
                print_analysis(&result);
            }
            if !result.is_reliable() {
                output::warning(
                    &format!("figures are {}, review before printing", result.quality.as_str()),
                    cli.quiet,
                );
            }
        }
    }

    Ok(())
}

/// Text lines shared by `analyze` and `quote`.
pub fn print_analysis(result: &AnalysisResult) {
    let b = result.bounding_box;
    output::field("Triangles", result.triangle_count);
    output::field("Volume", format!("{:.2} cm³", result.volume_cm3));
    output::field("Surface area", format!("{:.2} mm²", result.surface_area_mm2));
    output::field(
        "Dimensions",
        format!("{:.2} x {:.2} x {:.2} mm", b.x, b.y, b.z),
    );
    output::field(
        "Print time",
        format!(
            "{} min ({}h {:02}m)",
            result.estimated_print_time_minutes,
            result.estimated_print_time_minutes / 60,
            result.estimated_print_time_minutes % 60
        ),
    );
    output::field("Quality", result.quality.as_str());
}
