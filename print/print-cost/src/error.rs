//! Error types for cost estimation.

use thiserror::Error;
use tracing::error;

/// Result type for cost estimation.
pub type CostResult<T> = Result<T, CostError>;

/// Errors that can occur while estimating time or cost.
///
/// Both variants are defects in the caller's data, never something a
/// customer can fix by uploading a different file. The constructors log them
/// at `error` level.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    /// A print setting is outside its valid range.
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSettings {
        /// Name of the offending setting.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A measured input is negative or not finite.
    #[error("invalid input `{field}`: {value}")]
    InvalidInput {
        /// Name of the offending input.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl CostError {
    /// Create an invalid settings error.
    #[must_use]
    pub fn invalid_settings(field: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        error!(field, %reason, "Rejected print settings");
        Self::InvalidSettings { field, reason }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(field: &'static str, value: f64) -> Self {
        error!(field, value, "Rejected cost input");
        Self::InvalidInput { field, value }
    }

    /// Name of the field that caused the error.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidSettings { field, .. } | Self::InvalidInput { field, .. } => field,
        }
    }
}

/// Reject negative or non-finite measured values.
pub(crate) fn check_input(field: &'static str, value: f64) -> CostResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CostError::invalid_input(field, value))
    }
}
