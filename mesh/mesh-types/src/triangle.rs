//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions, in millimeters.
///
/// Winding is **counter-clockwise (CCW) when viewed from outside**, so the
/// normal points away from the enclosed volume.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// // Area of a right triangle with legs 1 and 1
/// assert!((tri.area() - 0.5).abs() < 1e-10);
///
/// // Normal points in +Z direction
/// let normal = tri.normal().unwrap();
/// assert!((normal.z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v1: Point3<f64>,
    /// Second vertex.
    pub v2: Point3<f64>,
    /// Third vertex.
    pub v3: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v1: Point3<f64>, v2: Point3<f64>, v3: Point3<f64>) -> Self {
        Self { v1, v2, v3 }
    }

    /// Create a triangle from coordinate arrays.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Triangle;
    ///
    /// let tri = Triangle::from_arrays(
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    /// );
    /// assert!((tri.area() - 0.5).abs() < 1e-10);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_arrays(v1: [f64; 3], v2: [f64; 3], v3: [f64; 3]) -> Self {
        Self {
            v1: Point3::new(v1[0], v1[1], v1[2]),
            v2: Point3::new(v2[0], v2[1], v2[2]),
            v3: Point3::new(v3[0], v3[1], v3[2]),
        }
    }

    /// Compute the (unnormalized) face normal, `(v2 - v1) × (v3 - v1)`.
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v2 - self.v1;
        let e2 = self.v3 - self.v1;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    ///
    /// Returns `None` for degenerate triangles (zero area).
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        if len_sq > f64::EPSILON {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Compute the area of the triangle: `0.5 * |(v2 - v1) × (v3 - v1)|`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Triangle, Point3};
    ///
    /// // Right triangle with legs 3 and 4
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(3.0, 0.0, 0.0),
    ///     Point3::new(0.0, 4.0, 0.0),
    /// );
    /// assert!((tri.area() - 6.0).abs() < 1e-10);
    /// ```
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Signed volume of the tetrahedron spanned by the origin and this
    /// triangle: `v1 · (v2 × v3) / 6`.
    ///
    /// Summed over a closed, consistently wound mesh this gives the enclosed
    /// volume (divergence theorem). Positive for faces whose normal points
    /// away from the origin.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Triangle;
    ///
    /// let tri = Triangle::from_arrays([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
    /// assert!((tri.signed_volume() - 1.0 / 6.0).abs() < 1e-12);
    /// assert!((tri.reversed().signed_volume() + 1.0 / 6.0).abs() < 1e-12);
    /// ```
    #[inline]
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let (a, b, c) = (&self.v1, &self.v2, &self.v3);
        // Using mul_add for better numerical accuracy
        let cross = Vector3::new(
            b.y.mul_add(c.z, -(b.z * c.y)),
            b.z.mul_add(c.x, -(b.x * c.z)),
            b.x.mul_add(c.y, -(b.y * c.x)),
        );
        a.z.mul_add(cross.z, a.x.mul_add(cross.x, a.y * cross.y)) / 6.0
    }

    /// Get vertices as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// Check that every coordinate is finite (no NaN or infinity).
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.vertices()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
    }

    /// Create a new triangle with reversed winding (flipped normal).
    #[inline]
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            v1: self.v1,
            v2: self.v3,
            v3: self.v2,
        }
    }
}
