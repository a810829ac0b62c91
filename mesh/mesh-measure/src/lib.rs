//! Volume, surface area and extents of triangle meshes.
//!
//! This crate turns a [`TriangleMesh`](mesh_types::TriangleMesh) into the
//! numbers a print quote needs.
//!
//! # Features
//!
//! - **Volume**: sum of signed tetrahedra against the origin, absolute value
//! - **Surface area**: sum of triangle areas
//! - **Extents**: axis-aligned bounding-box size
//! - **Fallbacks**: cube approximations when bounds or facets are missing,
//!   reported through [`BoundsSource`], [`AreaSource`] and [`Quality`]
//!
//! # Example
//!
//! ```
//! use mesh_types::cube;
//! use mesh_measure::measure;
//!
//! let m = measure(&cube(20.0));
//! assert!((m.volume_cm3() - 8.0).abs() < 1e-9);
//! assert!((m.extents.x - 20.0).abs() < 1e-9);
//! ```
//!
//! # Units
//!
//! Inputs are millimeters. Volumes are reported in mm³ with a cm³ accessor,
//! areas in mm².

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod estimate;
mod measure;

pub use error::{MeasureError, MeasureResult};
pub use estimate::{MM3_PER_CM3, estimate_extents_from_volume, estimate_surface_area_from_volume};
pub use measure::{AreaSource, BoundsSource, Measurements, Quality, measure};
