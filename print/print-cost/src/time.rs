//! Print-time heuristic.
//!
//! The formula is a rough storefront estimate, not a slicer. It mixes units
//! (cm³ of extrusion times 1000 treated as mm of path) and ignores geometry
//! beyond the volume. Quotes depend on its exact output, so it is kept as is:
//!
//! 1. `h = cbrt(volume_cm3) * 10`
//! 2. `layers = h / layer_height`
//! 3. `extrusion = volume_cm3 * (0.4 + infill / 100 * 0.6)`
//! 4. `path_mm = extrusion * 1000`
//! 5. `seconds = path_mm / speed + layers * 2`
//! 6. `minutes = ceil(seconds / 60 * 1.1)`

use tracing::debug;

use crate::error::check_input;
use crate::settings::check_time_params;
use crate::{CostError, CostResult, PrintSettings};

/// Share of extrusion spent on shells regardless of infill.
const SHELL_FRACTION: f64 = 0.4;

/// Seconds of travel and retraction charged per layer.
const SECONDS_PER_LAYER: f64 = 2.0;

/// Overhead for acceleration and retractions.
const OVERHEAD_FACTOR: f64 = 1.1;

/// Estimate print time in whole minutes, rounded up.
///
/// # Errors
///
/// - [`CostError::InvalidSettings`] when the layer height or speed is not
///   positive, or the infill is outside `[0, 100]`
/// - [`CostError::InvalidInput`] when the volume is negative or not finite
///
/// # Example
///
/// ```
/// use print_cost::estimate_print_time;
///
/// // 1 cm³ at 0.2 mm, 150 mm/s, 20 % infill
/// assert_eq!(estimate_print_time(1.0, 0.2, 150.0, 20.0).unwrap(), 2);
/// assert_eq!(estimate_print_time(0.0, 0.2, 150.0, 20.0).unwrap(), 0);
/// ```
pub fn estimate_print_time(
    volume_cm3: f64,
    layer_height_mm: f64,
    print_speed_mm_s: f64,
    infill_percent: f64,
) -> CostResult<u32> {
    check_time_params(layer_height_mm, print_speed_mm_s, infill_percent)?;
    let volume_cm3 = check_input("volume_cm3", volume_cm3)?;

    if volume_cm3 == 0.0 {
        return Ok(0);
    }

    let height_mm = volume_cm3.cbrt() * 10.0;
    let layers = height_mm / layer_height_mm;
    let extrusion = volume_cm3 * (SHELL_FRACTION + infill_percent / 100.0 * 0.6);
    let path_mm = extrusion * 1000.0;
    let seconds = path_mm / print_speed_mm_s + layers * SECONDS_PER_LAYER;
    let minutes = (seconds / 60.0 * OVERHEAD_FACTOR).ceil();

    if minutes > f64::from(u32::MAX) {
        return Err(CostError::invalid_input("volume_cm3", volume_cm3));
    }

    debug!(volume_cm3, layers, seconds, minutes, "Estimated print time");

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = minutes as u32;
    Ok(minutes)
}

/// Estimate print time using the layer height, speed and infill of `settings`.
///
/// # Errors
///
/// Same as [`estimate_print_time`].
pub fn estimate_print_time_with(volume_cm3: f64, settings: &PrintSettings) -> CostResult<u32> {
    estimate_print_time(
        volume_cm3,
        settings.default_layer_height,
        settings.print_speed,
        settings.default_infill,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn one_cubic_centimeter() {
        // h = 10, layers = 50, extrusion = 0.52, path = 520
        // seconds = 520 / 150 + 100 = 103.47, minutes = ceil(1.897) = 2
        assert_eq!(estimate_print_time(1.0, 0.2, 150.0, 20.0).unwrap(), 2);
    }

    #[test]
    fn larger_part() {
        // h = 50, layers = 250, extrusion = 125 * 0.52 = 65, path = 65000
        // seconds = 433.33 + 500 = 933.33, minutes = ceil(17.11) = 18
        assert_eq!(estimate_print_time(125.0, 0.2, 150.0, 20.0).unwrap(), 18);
    }

    #[test]
    fn full_infill_takes_longer() {
        let sparse = estimate_print_time(200.0, 0.2, 150.0, 0.0).unwrap();
        let solid = estimate_print_time(200.0, 0.2, 150.0, 100.0).unwrap();
        assert!(solid > sparse);
    }

    #[test]
    fn zero_volume_is_zero_minutes() {
        assert_eq!(estimate_print_time(0.0, 0.2, 150.0, 20.0).unwrap(), 0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let err = estimate_print_time(1.0, 0.0, 150.0, 20.0).unwrap_err();
        assert!(matches!(err, CostError::InvalidSettings { field: "default_layer_height", .. }));

        // Settings are checked even when there is nothing to print
        assert!(estimate_print_time(0.0, 0.0, 150.0, 20.0).is_err());

        let err = estimate_print_time(1.0, 0.2, -1.0, 20.0).unwrap_err();
        assert_eq!(err.field(), "print_speed");

        let err = estimate_print_time(1.0, 0.2, 150.0, 120.0).unwrap_err();
        assert_eq!(err.field(), "default_infill");
    }

    #[test]
    fn invalid_volume_is_rejected() {
        let err = estimate_print_time(-1.0, 0.2, 150.0, 20.0).unwrap_err();
        assert!(matches!(err, CostError::InvalidInput { field: "volume_cm3", .. }));
        assert!(estimate_print_time(f64::NAN, 0.2, 150.0, 20.0).is_err());
    }

    #[test]
    fn absurd_volume_overflows_cleanly() {
        assert!(estimate_print_time(1e15, 0.2, 150.0, 20.0).is_err());
    }

    #[test]
    fn settings_variant_matches() {
        let settings = PrintSettings::default();
        assert_eq!(
            estimate_print_time_with(125.0, &settings).unwrap(),
            estimate_print_time(125.0, 0.2, 150.0, 20.0).unwrap()
        );
    }
}
