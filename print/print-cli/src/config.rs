//! Loading print settings for the CLI.

use std::path::Path;

use anyhow::{Context, Result};
use print_cost::PrintSettings;
use tracing::debug;

/// Load settings from a JSON document, or use the defaults.
///
/// The document uses the storefront's camelCase field names and must contain
/// every field. The result is validated before it is returned.
pub fn load_settings(path: Option<&Path>) -> Result<PrintSettings> {
    let settings = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            let settings: PrintSettings = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
            debug!(path = %path.display(), printer = %settings.printer_model, "Loaded settings");
            settings
        }
        None => PrintSettings::default(),
    };

    settings.validate().context("Invalid print settings")?;
    Ok(settings)
}
