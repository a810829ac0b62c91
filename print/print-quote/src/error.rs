//! Error types for the quote pipeline.

use mesh_io::IoError;
use mesh_measure::MeasureError;
use print_cost::{BuildVolumeCheck, CostError};
use thiserror::Error;

/// Result type for quote operations.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Errors that can stop an upload from being quoted.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The file could not be decoded, or its format is not supported.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Settings or measured values are out of range.
    #[error(transparent)]
    Cost(#[from] CostError),

    /// An externally supplied volume is out of range.
    #[error(transparent)]
    Measure(#[from] MeasureError),

    /// The model does not fit the printer and oversized files are refused.
    #[error("{}", BuildVolumeCheck::message(.check))]
    ExceedsBuildVolume {
        /// The failed comparison.
        check: BuildVolumeCheck,
    },

    /// The upload is larger than the configured limit.
    #[error("file is {size_bytes} bytes, limit is {limit_bytes} bytes")]
    FileTooLarge {
        /// Size of the upload.
        size_bytes: u64,
        /// Configured limit.
        limit_bytes: u64,
    },
}

impl QuoteError {
    /// Message suitable for the person who uploaded the file.
    ///
    /// Settings and input defects are not the customer's fault and get a
    /// generic message; the details are in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => e.user_message().to_string(),
            Self::Cost(_) | Self::Measure(_) => "could not price this file".to_string(),
            Self::ExceedsBuildVolume { check } => check.message(),
            Self::FileTooLarge { limit_bytes, .. } => {
                format!("file is too large, maximum size is {} MB", limit_bytes / (1024 * 1024))
            }
        }
    }

    /// Whether the customer can fix this by uploading a different file.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Cost(_) | Self::Measure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::Extents;
    use print_cost::check_build_volume;

    #[test]
    fn io_errors_map_to_user_strings() {
        let err = QuoteError::from(IoError::NotYetImplemented { format: "3MF" });
        assert_eq!(err.user_message(), "format not yet supported");
        assert!(err.is_user_error());

        let err = QuoteError::from(IoError::invalid_content("bad"));
        assert_eq!(err.user_message(), "could not read file");
    }

    #[test]
    fn defects_are_not_user_errors() {
        let err = QuoteError::from(CostError::InvalidSettings {
            field: "print_speed",
            reason: "must be > 0, got 0".to_string(),
        });
        assert!(!err.is_user_error());
        assert_eq!(err.user_message(), "could not price this file");
        assert!(format!("{err}").contains("print_speed"));
    }

    #[test]
    fn oversized_message() {
        let check = check_build_volume(Extents::new(300.0, 100.0, 100.0), Extents::cube(256.0));
        let err = QuoteError::ExceedsBuildVolume { check };
        assert!(err.user_message().starts_with("File exceeds build volume."));
        assert_eq!(format!("{err}"), err.user_message());
    }

    #[test]
    fn too_large_message() {
        let err = QuoteError::FileTooLarge {
            size_bytes: 200 * 1024 * 1024,
            limit_bytes: 100 * 1024 * 1024,
        };
        assert_eq!(err.user_message(), "file is too large, maximum size is 100 MB");
    }
}
