//! End-to-end quote for an uploaded file.

use std::time::Instant;

use mesh_io::MeshFormat;
use print_cost::{
    BuildVolumeCheck, CostBreakdown, PrintSettings, calculate_print_cost, check_build_volume,
};
use tracing::{debug, info, warn};

use crate::{AnalysisResult, QuoteError, QuoteResult, analyze_mesh};

/// A priced upload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Quote {
    /// Geometry and print-time figures.
    pub analysis: AnalysisResult,
    /// Price breakdown.
    pub cost: CostBreakdown,
    /// Fit against the printer's build volume.
    pub build_volume: BuildVolumeCheck,
}

impl Quote {
    /// Total in integer minor units (cents), as payment providers expect.
    ///
    /// ```
    /// use mesh_io::{encode_stl, MeshFormat, StlEncoding};
    /// use mesh_types::cube;
    /// use print_cost::PrintSettings;
    /// use print_quote::quote;
    ///
    /// let bytes = encode_stl(&cube(10.0), StlEncoding::Binary).unwrap();
    /// let q = quote(&bytes, MeshFormat::Stl, &PrintSettings::default()).unwrap();
    /// assert_eq!(q.total_minor_units(), 1000);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn total_minor_units(&self) -> i64 {
        (self.cost.total * 100.0).round() as i64
    }
}

/// Quote an uploaded file.
///
/// Steps, in order:
///
/// 1. validate `settings`
/// 2. refuse uploads over the size limit
/// 3. decode and measure the mesh, estimate print time
/// 4. compare against the build volume, refusing oversized models when
///    [`PrintSettings::reject_oversized_files`] is set
/// 5. price the job
///
/// # Errors
///
/// - [`QuoteError::Cost`] for invalid settings
/// - [`QuoteError::FileTooLarge`] when the upload exceeds the limit
/// - [`QuoteError::Io`] for unsupported or malformed files
/// - [`QuoteError::ExceedsBuildVolume`] for oversized models
pub fn quote(bytes: &[u8], format: MeshFormat, settings: &PrintSettings) -> QuoteResult<Quote> {
    let start = Instant::now();

    settings.validate()?;

    let size_bytes = bytes.len() as u64;
    let limit_bytes = settings.max_file_size_bytes();
    if size_bytes > limit_bytes {
        warn!(size_bytes, limit_bytes, "Upload exceeds size limit");
        return Err(QuoteError::FileTooLarge {
            size_bytes,
            limit_bytes,
        });
    }

    info!(
        format = format.name(),
        size_bytes,
        printer = %settings.printer_model,
        "Starting quote"
    );

    let analysis = analyze_mesh(bytes, format, settings)?;

    let build_volume = check_build_volume(analysis.bounding_box, settings.build_volume);
    if build_volume.exceeds {
        if settings.reject_oversized_files {
            return Err(QuoteError::ExceedsBuildVolume {
                check: build_volume,
            });
        }
        debug!("Oversized model accepted by settings");
    }

    let cost = calculate_print_cost(&analysis.print_analysis(), settings)?;

    info!(
        total = cost.total,
        material = cost.material_cost,
        time = cost.time_cost,
        minimum_applied = cost.minimum_charge_applied,
        elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Quote complete"
    );

    Ok(Quote {
        analysis,
        cost,
        build_volume,
    })
}
