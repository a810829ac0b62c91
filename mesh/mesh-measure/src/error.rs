//! Error types for measurement operations.

use thiserror::Error;

/// Result type alias for measurement operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Errors that can occur during measurement operations.
#[derive(Debug, Error)]
pub enum MeasureError {
    /// A volume handed in from outside the mesh is negative or not finite.
    #[error("invalid volume: {value} cm³ (must be finite and >= 0)")]
    InvalidVolume {
        /// The rejected volume in cubic centimeters.
        value: f64,
    },
}

impl MeasureError {
    /// Create an invalid volume error.
    #[must_use]
    pub const fn invalid_volume(value: f64) -> Self {
        Self::InvalidVolume { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeasureError::invalid_volume(-2.5);
        assert!(format!("{err}").contains("-2.5"));
    }
}
