//! Approximations used when facet geometry is missing or unusable.
//!
//! Both estimates assume the part is a cube of the given volume. They are
//! rough on purpose and every result built from them is marked
//! [`Quality::Approximate`](crate::Quality::Approximate).

use mesh_types::Extents;

/// Cubic millimeters per cubic centimeter.
pub const MM3_PER_CM3: f64 = 1000.0;

/// Square millimeters per square centimeter.
const MM2_PER_CM2: f64 = 100.0;

/// Estimate bounding-box extents as a cube holding `volume_cm3`.
///
/// The side is `cbrt(volume_mm3)`. Non-positive or non-finite volumes give
/// zero extents.
///
/// # Example
///
/// ```
/// use mesh_measure::estimate_extents_from_volume;
///
/// let ext = estimate_extents_from_volume(8.0);
/// assert!((ext.x - 20.0).abs() < 1e-9);
/// assert_eq!(ext.x, ext.z);
/// ```
#[must_use]
pub fn estimate_extents_from_volume(volume_cm3: f64) -> Extents {
    if !is_usable(volume_cm3) {
        return Extents::zero();
    }
    Extents::cube((volume_cm3 * MM3_PER_CM3).cbrt())
}

/// Estimate surface area in mm² as a cube holding `volume_cm3`.
///
/// Computed as `volume_cm3^(2/3) * 6 * 100`. Non-positive or non-finite
/// volumes give 0.
///
/// # Example
///
/// ```
/// use mesh_measure::estimate_surface_area_from_volume;
///
/// // 1 cm³ cube: six 1 cm² faces
/// assert!((estimate_surface_area_from_volume(1.0) - 600.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn estimate_surface_area_from_volume(volume_cm3: f64) -> f64 {
    if !is_usable(volume_cm3) {
        return 0.0;
    }
    volume_cm3.powf(2.0 / 3.0) * 6.0 * MM2_PER_CM2
}

fn is_usable(volume_cm3: f64) -> bool {
    volume_cm3.is_finite() && volume_cm3 > 0.0
}
