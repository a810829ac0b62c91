//! Triangle-soup mesh.

use crate::{Aabb, MeshBounds, Triangle};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh stored as an unindexed list of triangles.
///
/// This is the geometry produced by STL parsing: every facet carries its own
/// three vertex positions and nothing is shared between facets. Coordinates
/// are millimeters.
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
/// For a closed mesh this makes [`signed_volume`](Self::signed_volume)
/// positive.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Triangle};
///
/// let mut mesh = TriangleMesh::new();
/// mesh.push(Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]));
///
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!(!mesh.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleMesh {
    /// Triangles in file order.
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    /// Create a mesh with room for `triangle_count` triangles.
    #[inline]
    #[must_use]
    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Create a mesh from a list of triangles.
    #[inline]
    #[must_use]
    pub const fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Append a triangle.
    #[inline]
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate over the triangles.
    pub fn iter(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.iter()
    }

    /// Iterate over every vertex position (three per triangle).
    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.triangles
            .iter()
            .flat_map(|t| [&t.v1, &t.v2, &t.v3])
    }

    /// Check that every vertex coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.triangles.iter().all(Triangle::is_finite)
    }

    /// Compute the signed volume of the mesh in cubic millimeters.
    ///
    /// Uses the divergence theorem: the sum of signed tetrahedra formed by
    /// each face and the origin.
    ///
    /// # Returns
    ///
    /// - Positive value: normals point outward (correct orientation)
    /// - Negative value: normals point inward (inside-out mesh)
    /// - Near-zero: mesh is not closed or has inconsistent winding
    ///
    /// # Note
    ///
    /// Exact only for a closed (watertight) mesh. For open meshes the result
    /// depends on the position of the origin.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles.iter().map(Triangle::signed_volume).sum()
    }

    /// Compute the absolute volume of the mesh in cubic millimeters.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Compute the total surface area in square millimeters.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Translate every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for tri in &mut self.triangles {
            tri.v1 += offset;
            tri.v2 += offset;
            tri.v3 += offset;
        }
    }

    /// Scale the mesh uniformly around the origin.
    pub fn scale(&mut self, factor: f64) {
        for tri in &mut self.triangles {
            tri.v1.coords *= factor;
            tri.v2.coords *= factor;
            tri.v3.coords *= factor;
        }
    }

    /// Flip every face by reversing its winding.
    pub fn flip_normals(&mut self) {
        for tri in &mut self.triangles {
            *tri = tri.reversed();
        }
    }
}

impl MeshBounds for TriangleMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions())
    }
}

impl FromIterator<Triangle> for TriangleMesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triangle> for TriangleMesh {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

/// Create a unit cube mesh from (0,0,0) to (1,1,1).
///
/// Twelve triangles with outward-facing normals.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.triangle_count(), 12);
/// assert!((cube.volume() - 1.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn unit_cube() -> TriangleMesh {
    const CORNERS: [[f64; 3]; 8] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];

    // 2 triangles per side, CCW winding when viewed from outside
    const FACES: [[usize; 3]; 12] = [
        [0, 2, 1], // bottom (-Z)
        [0, 3, 2],
        [4, 5, 6], // top (+Z)
        [4, 6, 7],
        [0, 1, 5], // front (-Y)
        [0, 5, 4],
        [3, 7, 6], // back (+Y)
        [3, 6, 2],
        [0, 4, 7], // left (-X)
        [0, 7, 3],
        [1, 2, 6], // right (+X)
        [1, 6, 5],
    ];

    FACES
        .iter()
        .map(|&[a, b, c]| Triangle::from_arrays(CORNERS[a], CORNERS[b], CORNERS[c]))
        .collect()
}

/// Create an axis-aligned cube with the given edge length in millimeters,
/// with one corner at the origin.
#[must_use]
pub fn cube(edge: f64) -> TriangleMesh {
    let mut mesh = unit_cube();
    mesh.scale(edge);
    mesh
}
