//! Build-volume fit check.

use mesh_types::Extents;
use tracing::warn;

/// Result of comparing a model's extents against a printer's build volume.
///
/// # Example
///
/// ```
/// use mesh_types::Extents;
/// use print_cost::check_build_volume;
///
/// let check = check_build_volume(Extents::new(300.0, 100.0, 100.0), Extents::cube(256.0));
/// assert!(check.exceeds);
/// assert!((check.overflow.x - 44.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BuildVolumeCheck {
    /// Model bounding-box size in mm.
    pub model: Extents,
    /// Printer build volume in mm.
    pub build_volume: Extents,
    /// Whether any model axis is larger than the matching build axis.
    pub exceeds: bool,
    /// Per-axis excess in mm, 0 where the model fits.
    pub overflow: Extents,
}

impl BuildVolumeCheck {
    /// Model dimensions rounded up to whole millimeters.
    #[must_use]
    pub fn model_ceil_mm(&self) -> [f64; 3] {
        self.model.to_array().map(f64::ceil)
    }

    /// Customer-facing rejection message.
    ///
    /// ```
    /// use mesh_types::Extents;
    /// use print_cost::check_build_volume;
    ///
    /// let check = check_build_volume(Extents::new(300.2, 100.0, 99.5), Extents::cube(256.0));
    /// assert_eq!(
    ///     check.message(),
    ///     "File exceeds build volume. Maximum dimensions: 256×256×256mm. Your model: 301×100×100mm"
    /// );
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        let b = self.build_volume;
        let [x, y, z] = self.model_ceil_mm();
        format!(
            "File exceeds build volume. Maximum dimensions: {}×{}×{}mm. Your model: {x}×{y}×{z}mm",
            b.x, b.y, b.z
        )
    }
}

/// Compare model extents against a build volume.
///
/// A model exactly as large as the build volume fits.
#[must_use]
pub fn check_build_volume(model: Extents, build_volume: Extents) -> BuildVolumeCheck {
    let exceeds = !model.fits_within(&build_volume);
    let overflow = model.excess_over(&build_volume);

    if exceeds {
        warn!(
            model_x = model.x,
            model_y = model.y,
            model_z = model.z,
            build_x = build_volume.x,
            build_y = build_volume.y,
            build_z = build_volume.z,
            "Model exceeds build volume"
        );
    }

    BuildVolumeCheck {
        model,
        build_volume,
        exceeds,
        overflow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_on_one_axis() {
        let check = check_build_volume(Extents::new(300.0, 100.0, 100.0), Extents::cube(256.0));
        assert!(check.exceeds);
        assert!((check.overflow.x - 44.0).abs() < 1e-9);
        assert!(check.overflow.y.abs() < 1e-9);
        assert!(check.overflow.z.abs() < 1e-9);
    }

    #[test]
    fn touching_the_limit_fits() {
        let check = check_build_volume(Extents::cube(256.0), Extents::cube(256.0));
        assert!(!check.exceeds);
        assert_eq!(check.overflow, Extents::zero());
    }

    #[test]
    fn tall_model_on_short_printer() {
        let check = check_build_volume(
            Extents::new(100.0, 100.0, 230.0),
            Extents::new(250.0, 210.0, 220.0),
        );
        assert!(check.exceeds);
        assert!((check.overflow.z - 10.0).abs() < 1e-9);
    }

    #[test]
    fn message_rounds_model_up() {
        let check = check_build_volume(Extents::new(256.01, 10.0, 0.5), Extents::cube(256.0));
        assert_eq!(
            check.message(),
            "File exceeds build volume. Maximum dimensions: 256×256×256mm. Your model: 257×10×1mm"
        );
    }

    #[test]
    fn non_finite_model_never_fits() {
        let check = check_build_volume(Extents::cube(f64::NAN), Extents::cube(256.0));
        assert!(check.exceeds);
    }
}
