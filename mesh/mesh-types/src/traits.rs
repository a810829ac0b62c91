//! Traits for mesh types.

use crate::{Aabb, Extents};

/// Trait for types that can compute a bounding box.
pub trait MeshBounds {
    /// Compute the axis-aligned bounding box.
    ///
    /// Returns an empty AABB if the mesh has no vertices.
    fn bounds(&self) -> Aabb;

    /// Get the per-axis dimensions of the bounding box.
    fn extents(&self) -> Extents {
        self.bounds().extents()
    }
}
