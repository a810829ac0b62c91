//! Mesh analysis: decode, measure and estimate print time.

use mesh_io::{IoError, MeshFormat, parse_mesh};
use mesh_measure::{Measurements, Quality, measure};
use mesh_types::Extents;
use print_cost::{PrintAnalysis, PrintSettings, estimate_print_time_with};
use tracing::{info, warn};

use crate::QuoteResult;

/// Geometry and print-time figures for one uploaded model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AnalysisResult {
    /// Model volume in cm³.
    pub volume_cm3: f64,
    /// Surface area in mm².
    pub surface_area_mm2: f64,
    /// Bounding-box size in mm.
    pub bounding_box: Extents,
    /// Estimated print time in whole minutes.
    pub estimated_print_time_minutes: u32,
    /// Number of triangles in the file.
    pub triangle_count: usize,
    /// How far the figures can be trusted.
    pub quality: Quality,
}

impl AnalysisResult {
    /// Combine measurements with a print-time estimate.
    #[must_use]
    pub fn from_measurements(m: &Measurements, estimated_print_time_minutes: u32) -> Self {
        Self {
            volume_cm3: m.volume_cm3(),
            surface_area_mm2: m.surface_area_mm2,
            bounding_box: m.extents,
            estimated_print_time_minutes,
            triangle_count: m.triangle_count,
            quality: m.quality(),
        }
    }

    /// Whether every figure was measured from facets.
    ///
    /// Degenerate and approximate results can still be priced but should be
    /// reviewed before printing.
    #[must_use]
    pub fn is_reliable(&self) -> bool {
        self.quality == Quality::Measured
    }

    /// Inputs for [`calculate_print_cost`](print_cost::calculate_print_cost).
    #[must_use]
    pub const fn print_analysis(&self) -> PrintAnalysis {
        PrintAnalysis::new(self.volume_cm3, self.estimated_print_time_minutes)
    }
}

/// Decode `bytes` as `format`, measure the mesh and estimate print time.
///
/// An empty mesh is not an error: it yields all-zero figures with
/// [`Quality::Degenerate`].
///
/// # Errors
///
/// - [`QuoteError::Io`](crate::QuoteError::Io) when the format is
///   unsupported, the bytes are malformed, or the coordinates are so large
///   that volume or area overflow
/// - [`QuoteError::Cost`](crate::QuoteError::Cost) when the layer height,
///   speed or infill in `settings` is out of range
///
/// # Example
///
/// ```
/// use mesh_io::{encode_stl, MeshFormat, StlEncoding};
/// use mesh_types::cube;
/// use print_cost::PrintSettings;
/// use print_quote::analyze_mesh;
///
/// let bytes = encode_stl(&cube(10.0), StlEncoding::Binary).unwrap();
/// let result = analyze_mesh(&bytes, MeshFormat::Stl, &PrintSettings::default()).unwrap();
///
/// assert_eq!(result.triangle_count, 12);
/// assert!((result.volume_cm3 - 1.0).abs() < 1e-6);
/// assert!(result.is_reliable());
/// ```
pub fn analyze_mesh(
    bytes: &[u8],
    format: MeshFormat,
    settings: &PrintSettings,
) -> QuoteResult<AnalysisResult> {
    let mesh = parse_mesh(bytes, format)?;
    let measurements = measure(&mesh);
    if !measurements.is_finite() {
        warn!(
            volume_mm3 = measurements.volume_mm3,
            area_mm2 = measurements.surface_area_mm2,
            "Mesh coordinates overflow the measurements"
        );
        return Err(IoError::invalid_content("coordinates are too large to measure").into());
    }
    let minutes = estimate_print_time_with(measurements.volume_cm3(), settings)?;
    let result = AnalysisResult::from_measurements(&measurements, minutes);

    log_analysis(format, &result);
    Ok(result)
}

/// Analyze a model known only by its volume.
///
/// Extents and area come from the cube approximation, so the result is
/// [`Quality::Approximate`] (or [`Quality::Degenerate`] for zero volume).
///
/// # Errors
///
/// - [`QuoteError::Measure`](crate::QuoteError::Measure) when the volume is
///   negative or not finite
/// - [`QuoteError::Cost`](crate::QuoteError::Cost) for out-of-range settings
pub fn analyze_volume(volume_cm3: f64, settings: &PrintSettings) -> QuoteResult<AnalysisResult> {
    let measurements = Measurements::from_volume_only(volume_cm3)?;
    let minutes = estimate_print_time_with(measurements.volume_cm3(), settings)?;
    Ok(AnalysisResult::from_measurements(&measurements, minutes))
}

fn log_analysis(format: MeshFormat, result: &AnalysisResult) {
    info!(
        format = format.name(),
        triangles = result.triangle_count,
        volume_cm3 = result.volume_cm3,
        minutes = result.estimated_print_time_minutes,
        quality = result.quality.as_str(),
        "Analyzed mesh"
    );
    if result.quality == Quality::Degenerate {
        warn!("Mesh has no triangles, figures are zero");
    }
}
