//! Print-time and cost estimation for 3D print quotes.
//!
//! This crate prices a print job from its measured volume:
//!
//! - [`PrintSettings`] - printer, slicing and pricing parameters
//! - [`estimate_print_time`] - storefront print-time heuristic
//! - [`calculate_print_cost`] - material, machine time, fee and minimum charge
//! - [`check_build_volume`] - does the model fit the printer
//!
//! Every function is pure and synchronous.
//!
//! # Example
//!
//! ```
//! use print_cost::{calculate_print_cost, estimate_print_time_with, PrintAnalysis, PrintSettings};
//!
//! let settings = PrintSettings::default();
//! let minutes = estimate_print_time_with(125.0, &settings).unwrap();
//! let cost = calculate_print_cost(&PrintAnalysis::new(125.0, minutes), &settings).unwrap();
//!
//! assert_eq!(minutes, 18);
//! assert!(cost.total >= settings.minimum_charge);
//! ```
//!
//! # Units
//!
//! Volumes are cm³, lengths mm, speeds mm/s, times minutes, densities g/cm³.
//! Money is in the shop's currency units (not cents).

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod build_volume;
mod cost;
mod error;
mod settings;
mod time;

pub use build_volume::{BuildVolumeCheck, check_build_volume};
pub use cost::{CostBreakdown, PrintAnalysis, calculate_print_cost, round_cents};
pub use error::{CostError, CostResult};
pub use settings::PrintSettings;
pub use time::{estimate_print_time, estimate_print_time_with};

// Re-export for callers building build volumes
pub use mesh_types::Extents;
