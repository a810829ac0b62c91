//! Upload-to-quote pipeline for a 3D printing service.
//!
//! Takes the raw bytes of an uploaded model and a [`PrintSettings`]
//! snapshot, and produces a [`Quote`]: geometry figures, print-time estimate,
//! build-volume fit and price.
//!
//! The pipeline has no I/O and no shared state. Storage, payment and job
//! scheduling belong to the caller.
//!
//! # Quick Start
//!
//! ```
//! use print_quote::prelude::*;
//! use mesh_io::{encode_stl, StlEncoding};
//! use mesh_types::cube;
//!
//! let bytes = encode_stl(&cube(30.0), StlEncoding::Binary).unwrap();
//! let settings = PrintSettings::default();
//!
//! let quote = quote(&bytes, MeshFormat::Stl, &settings).unwrap();
//! assert_eq!(quote.analysis.triangle_count, 12);
//! assert!(quote.cost.total >= settings.minimum_charge);
//! ```
//!
//! # Crate Structure
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | `mesh-types` | Triangle, mesh and extents types |
//! | `mesh-io` | STL decoding and format detection |
//! | `mesh-measure` | Volume, area, extents and fallbacks |
//! | `print-cost` | Settings, print time, cost, build-volume check |
//! | `print-quote` | This crate: the end-to-end pipeline |

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod analysis;
mod error;
mod quote;

pub use analysis::{AnalysisResult, analyze_mesh, analyze_volume};
pub use error::{QuoteError, QuoteResult};
pub use quote::{Quote, quote};

pub use mesh_io::MeshFormat;
pub use mesh_measure::Quality;
pub use print_cost::{BuildVolumeCheck, CostBreakdown, PrintSettings};

/// Prelude for common imports.
///
/// ```
/// use print_quote::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AnalysisResult, BuildVolumeCheck, CostBreakdown, MeshFormat, PrintSettings, Quality,
        Quote, QuoteError, QuoteResult, analyze_mesh, quote,
    };
}
