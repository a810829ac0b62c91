//! Cost breakdown for a print job.

use tracing::debug;

use crate::error::check_input;
use crate::{CostResult, PrintSettings};

/// Minutes per hour.
const MINUTES_PER_HOUR: f64 = 60.0;

/// Inputs to [`calculate_print_cost`] taken from mesh analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PrintAnalysis {
    /// Model volume in cm³.
    pub volume_cm3: f64,
    /// Estimated print time in minutes.
    pub estimated_print_time_minutes: u32,
}

impl PrintAnalysis {
    /// Create analysis inputs.
    #[must_use]
    pub const fn new(volume_cm3: f64, estimated_print_time_minutes: u32) -> Self {
        Self {
            volume_cm3,
            estimated_print_time_minutes,
        }
    }
}

/// Price of a print job in currency units.
///
/// `material_cost`, `time_cost`, `subtotal` and `total` are rounded to cents.
/// The subtotal and the minimum-charge comparison use the unrounded values.
/// `base_fee` is the configured fee, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CostBreakdown {
    /// Material weight in grams, rounded to 2 decimals.
    pub material_grams: f64,
    /// Material price.
    pub material_cost: f64,
    /// Machine time price.
    pub time_cost: f64,
    /// Flat order fee.
    pub base_fee: f64,
    /// `base_fee + material_cost + time_cost`.
    pub subtotal: f64,
    /// Amount charged: the subtotal, or the minimum charge if higher.
    pub total: f64,
    /// Whether the minimum charge replaced the subtotal.
    pub minimum_charge_applied: bool,
}

/// Price a print job.
///
/// # Errors
///
/// - [`CostError::InvalidInput`](crate::CostError::InvalidInput) when the
///   volume is negative or not finite
/// - [`CostError::InvalidSettings`](crate::CostError::InvalidSettings) when
///   the density is not positive or a price is negative or not finite
///
/// # Example
///
/// ```
/// use print_cost::{calculate_print_cost, PrintAnalysis, PrintSettings};
///
/// let cost = calculate_print_cost(&PrintAnalysis::new(0.0, 0), &PrintSettings::default()).unwrap();
/// assert_eq!(cost.subtotal, 5.0);
/// assert_eq!(cost.total, 10.0);
/// assert!(cost.minimum_charge_applied);
/// ```
pub fn calculate_print_cost(
    analysis: &PrintAnalysis,
    settings: &PrintSettings,
) -> CostResult<CostBreakdown> {
    settings.check_pricing()?;
    let volume_cm3 = check_input("volume_cm3", analysis.volume_cm3)?;

    let grams = volume_cm3 * settings.material_density;
    let material_cost = grams * settings.price_per_gram;
    let hours = f64::from(analysis.estimated_print_time_minutes) / MINUTES_PER_HOUR;
    let time_cost = hours * settings.hourly_machine_rate;

    let subtotal = settings.base_order_fee + material_cost + time_cost;
    let total = subtotal.max(settings.minimum_charge);

    debug!(grams, material_cost, time_cost, subtotal, total, "Calculated print cost");

    Ok(CostBreakdown {
        material_grams: round_cents(grams),
        material_cost: round_cents(material_cost),
        time_cost: round_cents(time_cost),
        base_fee: settings.base_order_fee,
        subtotal: round_cents(subtotal),
        total: round_cents(total),
        minimum_charge_applied: settings.minimum_charge > subtotal,
    })
}

/// Round to 2 decimals, halves away from zero.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
