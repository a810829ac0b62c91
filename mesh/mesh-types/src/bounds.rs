//! Axis-aligned bounding box and box extents.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// Represents a 3D box aligned with the coordinate axes, defined by
/// minimum and maximum corner points.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 20.0, 30.0),
/// );
///
/// let ext = aabb.extents();
/// assert_eq!((ext.x, ext.y, ext.z), (10.0, 20.0, 30.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from minimum and maximum corners.
    ///
    /// The corners are automatically corrected if min > max for any axis.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create an empty (invalid) AABB.
    ///
    /// An empty AABB has min > max, which is useful as a starting point
    /// for expanding to include points.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create an AABB from an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Check if the AABB is empty (min > max for any axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Check that both corners are finite.
    ///
    /// An empty AABB is not finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.min, self.max]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
    }

    /// Get the size of the AABB as a vector.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Get the per-axis dimensions of the AABB.
    ///
    /// Returns zero extents for an empty AABB.
    #[must_use]
    pub fn extents(&self) -> Extents {
        if self.is_empty() {
            return Extents::zero();
        }
        let s = self.size();
        Extents::new(s.x, s.y, s.z)
    }

    /// Expand the AABB to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// Box dimensions along X, Y and Z in millimeters.
///
/// Used both for a model's bounding box and for a printer's build volume.
///
/// # Example
///
/// ```
/// use mesh_types::Extents;
///
/// let model = Extents::new(300.0, 100.0, 100.0);
/// let build = Extents::cube(256.0);
/// assert!(!model.fits_within(&build));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extents {
    /// Width (X).
    pub x: f64,
    /// Depth (Y).
    pub y: f64,
    /// Height (Z).
    pub z: f64,
}

impl Extents {
    /// Create extents from per-axis dimensions.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Isotropic extents with the same size on every axis.
    #[inline]
    #[must_use]
    pub const fn cube(side: f64) -> Self {
        Self::new(side, side, side)
    }

    /// All-zero extents.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Volume of the box in cubic millimeters.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.x * self.y * self.z
    }

    /// Check that every axis is finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Check that no axis exceeds the matching axis of `container`.
    ///
    /// Touching the limit counts as fitting.
    #[must_use]
    pub fn fits_within(&self, container: &Self) -> bool {
        self.x <= container.x && self.y <= container.y && self.z <= container.z
    }

    /// Per-axis amount by which `self` exceeds `container` (0 where it fits).
    #[must_use]
    pub fn excess_over(&self, container: &Self) -> Self {
        Self::new(
            (self.x - container.x).max(0.0),
            (self.y - container.y).max(0.0),
            (self.z - container.z).max(0.0),
        )
    }

    /// Get the extents as an `[x, y, z]` array.
    #[inline]
    #[must_use]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}
