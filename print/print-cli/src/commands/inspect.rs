//! printquote inspect command - summarize a mesh file.

use std::path::Path;

use anyhow::Result;
use mesh_io::inspect;
use serde::Serialize;

use crate::{Cli, OutputFormat, output, read_upload};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectReport {
    path: String,
    #[serde(flatten)]
    info: mesh_io::MeshFileInfo,
}

pub fn run(input: &Path, cli: &Cli) -> Result<()> {
    let (bytes, format) = read_upload(input, None)?;
    let report = InspectReport {
        path: input.display().to_string(),
        info: inspect(&bytes, format),
    };

    match cli.output {
        OutputFormat::Json => output::print(&report, cli.output, cli.quiet),
        OutputFormat::Text => {
            if !cli.quiet {
                let info = &report.info;
                output::heading("File Information");
                output::field("File", &report.path);
                output::field("Format", info.format);
                output::field("Encoding", if info.is_ascii { "text" } else { "binary" });
                output::field("Size", format!("{} bytes", info.byte_len));
                if let Some(triangles) = info.estimated_triangles {
                    output::field("Triangles", triangles);
                }
                if let Some(vertices) = info.estimated_vertices {
                    output::field("Vertices", vertices);
                }
            }
        }
    }

    Ok(())
}
