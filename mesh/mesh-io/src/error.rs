//! Error types for mesh decoding.

use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while decoding mesh bytes.
#[derive(Debug, Error)]
pub enum IoError {
    /// The declared format is not a triangle-mesh format this crate knows.
    #[error("unsupported file format: {name}")]
    UnsupportedFormat {
        /// The format name or extension that was rejected.
        name: String,
    },

    /// The format is recognized but no decoder exists for it yet.
    #[error("{format} analysis is not implemented yet")]
    NotYetImplemented {
        /// Display name of the format.
        format: &'static str,
    },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// Binary STL shorter than its fixed header.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual number of bytes available.
        got: usize,
    },

    /// Binary STL whose triangle count does not match the data present.
    #[error("invalid face count: header declares {expected} triangles, data holds {got}")]
    InvalidFaceCount {
        /// Triangle count declared in the header.
        expected: u32,
        /// Complete triangle records actually present.
        got: u32,
    },

    /// UTF-8 decoding error in an ASCII STL.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// I/O error from a writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Create an `InvalidContent` error tied to a line of an ASCII file.
    #[must_use]
    pub fn at_line(line: usize, message: impl std::fmt::Display) -> Self {
        Self::InvalidContent {
            message: format!("line {line}: {message}"),
        }
    }

    /// Whether the failure means "this format cannot be analyzed".
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::NotYetImplemented { .. }
        )
    }

    /// Whether the failure means "the bytes could not be decoded".
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidContent { .. }
                | Self::InvalidHeader { .. }
                | Self::InvalidFaceCount { .. }
                | Self::Utf8(_)
        )
    }

    /// Short message suitable for showing to the person who uploaded the file.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        if self.is_unsupported() {
            "format not yet supported"
        } else {
            "could not read file"
        }
    }
}
