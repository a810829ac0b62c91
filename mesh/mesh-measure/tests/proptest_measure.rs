//! Property-based tests for mesh measurement.
//!
//! Run with: cargo test -p mesh-measure -- proptest

use mesh_measure::{Quality, estimate_extents_from_volume, measure};
use mesh_types::{Triangle, TriangleMesh, Vector3, cube};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generate a random vertex position in a bounded range.
fn arb_position() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-100.0..100.0f64)
}

/// Generate a triangle soup of up to `max` triangles.
fn arb_soup(max: usize) -> impl Strategy<Value = TriangleMesh> {
    prop::collection::vec((arb_position(), arb_position(), arb_position()), 0..=max).prop_map(
        |tris| {
            tris.into_iter()
                .map(|(a, b, c)| Triangle::from_arrays(a, b, c))
                .collect()
        },
    )
}

fn arb_offset() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-500.0..500.0f64).prop_map(|[x, y, z]| Vector3::new(x, y, z))
}

// =============================================================================
// Property Tests: Measurement
// =============================================================================

proptest! {
    /// Measured values are never negative.
    #[test]
    fn measurements_are_non_negative(mesh in arb_soup(40)) {
        let m = measure(&mesh);
        prop_assert!(m.volume_mm3 >= 0.0);
        prop_assert!(m.surface_area_mm2 >= 0.0);
        prop_assert!(m.extents.x >= 0.0 && m.extents.y >= 0.0 && m.extents.z >= 0.0);
        prop_assert_eq!(m.triangle_count, mesh.triangle_count());
    }

    /// Measuring twice gives bit-identical results.
    #[test]
    fn measurement_is_deterministic(mesh in arb_soup(40)) {
        prop_assert_eq!(measure(&mesh), measure(&mesh));
    }

    /// Moving a closed mesh changes neither extents nor volume.
    #[test]
    fn translation_invariant(edge in 0.5..200.0f64, offset in arb_offset()) {
        let base = measure(&cube(edge));
        let mut moved = cube(edge);
        moved.translate(offset);
        let m = measure(&moved);

        let tol = 1e-9 * (1.0 + offset.norm());
        prop_assert!((m.extents.x - base.extents.x).abs() < tol);
        prop_assert!((m.extents.y - base.extents.y).abs() < tol);
        prop_assert!((m.extents.z - base.extents.z).abs() < tol);
        prop_assert!((m.volume_mm3 - base.volume_mm3).abs() < 1e-6 * base.volume_mm3.max(1.0));
        prop_assert_eq!(m.quality(), Quality::Measured);
    }

    /// The cube estimate reproduces the volume it was built from.
    #[test]
    fn cube_estimate_preserves_volume(volume_cm3 in 0.001..10_000.0f64) {
        let ext = estimate_extents_from_volume(volume_cm3);
        let back = ext.volume() / 1000.0;
        prop_assert!((back - volume_cm3).abs() < 1e-9 * volume_cm3.max(1.0));
    }
}
