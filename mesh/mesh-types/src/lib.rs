//! Core geometry types for print analysis.
//!
//! This crate provides the foundational types used by the mesh analyzer:
//!
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`TriangleMesh`] - An unindexed list of triangles, as read from STL
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Extents`] - Box dimensions, for models and build volumes
//!
//! # Units
//!
//! All coordinates are `f64` **millimeters**. Volumes are cubic millimeters
//! and areas square millimeters unless a name says otherwise.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{cube, MeshBounds};
//!
//! let mesh = cube(10.0);
//! assert_eq!(mesh.triangle_count(), 12);
//! assert!((mesh.volume() - 1000.0).abs() < 1e-9);
//! assert!((mesh.extents().z - 10.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod traits;
mod triangle;

// Re-export core types
pub use bounds::{Aabb, Extents};
pub use mesh::{TriangleMesh, cube, unit_cube};
pub use traits::MeshBounds;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
