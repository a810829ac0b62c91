//! Facet-based mesh measurement with explicit fallback branches.

use mesh_types::{Extents, MeshBounds, TriangleMesh};
use tracing::{debug, warn};

use crate::estimate::{MM3_PER_CM3, estimate_extents_from_volume, estimate_surface_area_from_volume};
use crate::{MeasureError, MeasureResult};

/// Where a [`Measurements::extents`] value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum BoundsSource {
    /// Running min/max over every vertex.
    Measured,
    /// Cube of the measured volume.
    EstimatedFromVolume,
}

/// Where a [`Measurements::surface_area_mm2`] value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum AreaSource {
    /// Sum of triangle areas.
    Measured,
    /// Surface of a cube of the given volume.
    EstimatedFromVolume,
}

/// How much a measurement can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Quality {
    /// Every value was computed from facets.
    Measured,
    /// At least one value came from a cube approximation.
    Approximate,
    /// Nothing to measure: no triangles and no volume.
    Degenerate,
}

impl Quality {
    /// Lowercase name for logs and text output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Measured => "measured",
            Self::Approximate => "approximate",
            Self::Degenerate => "degenerate",
        }
    }
}

/// Geometric measurements of a mesh.
///
/// # Example
///
/// ```
/// use mesh_measure::{measure, Quality};
/// use mesh_types::cube;
///
/// let m = measure(&cube(10.0));
/// assert!((m.volume_cm3() - 1.0).abs() < 1e-9);
/// assert!((m.surface_area_mm2 - 600.0).abs() < 1e-9);
/// assert_eq!(m.quality(), Quality::Measured);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Measurements {
    /// Enclosed volume in mm³ (absolute value of the signed sum).
    pub volume_mm3: f64,
    /// Total facet area in mm².
    pub surface_area_mm2: f64,
    /// Bounding-box size in mm.
    pub extents: Extents,
    /// Number of triangles measured.
    pub triangle_count: usize,
    /// Origin of `extents`.
    pub bounds_source: BoundsSource,
    /// Origin of `surface_area_mm2`.
    pub area_source: AreaSource,
}

impl Measurements {
    /// Measurements of an empty mesh.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            volume_mm3: 0.0,
            surface_area_mm2: 0.0,
            extents: Extents::zero(),
            triangle_count: 0,
            bounds_source: BoundsSource::Measured,
            area_source: AreaSource::Measured,
        }
    }

    /// Build measurements when only a volume is known.
    ///
    /// Extents and surface area come from the cube approximations and the
    /// triangle count is 0.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidVolume`] when `volume_cm3` is negative
    /// or not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_measure::{Measurements, Quality};
    ///
    /// let m = Measurements::from_volume_only(1.0).unwrap();
    /// assert!((m.extents.x - 10.0).abs() < 1e-9);
    /// assert!((m.surface_area_mm2 - 600.0).abs() < 1e-9);
    /// assert_eq!(m.quality(), Quality::Approximate);
    /// ```
    pub fn from_volume_only(volume_cm3: f64) -> MeasureResult<Self> {
        if !volume_cm3.is_finite() || volume_cm3 < 0.0 {
            return Err(MeasureError::invalid_volume(volume_cm3));
        }
        if volume_cm3 == 0.0 {
            return Ok(Self::empty());
        }

        warn!(volume_cm3, "No facets available, estimating extents and area from volume");
        Ok(Self {
            volume_mm3: volume_cm3 * MM3_PER_CM3,
            surface_area_mm2: estimate_surface_area_from_volume(volume_cm3),
            extents: estimate_extents_from_volume(volume_cm3),
            triangle_count: 0,
            bounds_source: BoundsSource::EstimatedFromVolume,
            area_source: AreaSource::EstimatedFromVolume,
        })
    }

    /// Volume in cm³.
    #[must_use]
    pub fn volume_cm3(&self) -> f64 {
        self.volume_mm3 / MM3_PER_CM3
    }

    /// Whether volume, area and extents are all finite.
    ///
    /// Finite but huge coordinates can still overflow the sums.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.volume_mm3.is_finite()
            && self.surface_area_mm2.is_finite()
            && self.extents.is_finite()
    }

    /// Whether any value came from an approximation.
    #[must_use]
    pub const fn is_estimated(&self) -> bool {
        matches!(self.bounds_source, BoundsSource::EstimatedFromVolume)
            || matches!(self.area_source, AreaSource::EstimatedFromVolume)
    }

    /// Classify how far these numbers can be trusted.
    #[must_use]
    pub fn quality(&self) -> Quality {
        if self.triangle_count == 0 && self.volume_mm3 <= 0.0 {
            Quality::Degenerate
        } else if self.is_estimated() {
            Quality::Approximate
        } else {
            Quality::Measured
        }
    }
}

impl Default for Measurements {
    fn default() -> Self {
        Self::empty()
    }
}

/// Measure volume, surface area, extents and triangle count of a mesh.
///
/// An empty mesh measures as all zeros. When some vertex is not finite the
/// bounding box is unusable: those triangles are left out of the sums and the
/// extents are estimated as a cube of the remaining volume.
#[must_use]
pub fn measure(mesh: &TriangleMesh) -> Measurements {
    if mesh.is_empty() {
        debug!("Measuring empty mesh");
        return Measurements::empty();
    }

    if mesh.is_finite() {
        let m = Measurements {
            volume_mm3: mesh.volume(),
            surface_area_mm2: mesh.surface_area(),
            extents: mesh.extents(),
            triangle_count: mesh.triangle_count(),
            bounds_source: BoundsSource::Measured,
            area_source: AreaSource::Measured,
        };
        debug!(
            triangles = m.triangle_count,
            volume_mm3 = m.volume_mm3,
            area_mm2 = m.surface_area_mm2,
            "Measured mesh"
        );
        return m;
    }

    let finite = mesh.iter().filter(|t| t.is_finite());
    let (signed, area, kept) = finite.fold((0.0, 0.0, 0_usize), |(v, a, n), t| {
        (v + t.signed_volume(), a + t.area(), n + 1)
    });
    let volume_mm3 = signed.abs();

    warn!(
        triangles = mesh.triangle_count(),
        skipped = mesh.triangle_count() - kept,
        volume_mm3,
        "Bounding box is not finite, estimating extents from volume"
    );

    Measurements {
        volume_mm3,
        surface_area_mm2: area,
        extents: estimate_extents_from_volume(volume_mm3 / MM3_PER_CM3),
        triangle_count: mesh.triangle_count(),
        bounds_source: BoundsSource::EstimatedFromVolume,
        area_source: AreaSource::Measured,
    }
}
