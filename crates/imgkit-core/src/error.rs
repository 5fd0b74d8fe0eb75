//! Error types for imgkit-core.
//!
//! # Usage
//!
//! ```rust
//! use imgkit_core::{Error, PixelBuffer, Rgba8};
//!
//! let err = PixelBuffer::new(2, 2, vec![Rgba8::BLACK; 3]).unwrap_err();
//! assert!(matches!(err, Error::ShapeMismatch { expected: 4, got: 3 }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when building or validating pixel buffers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer length does not match the declared width x height.
    ///
    /// Callers must be rejected here instead of having their data silently
    /// truncated or padded.
    #[error("buffer holds {got} pixels, expected {expected}")]
    ShapeMismatch {
        /// Pixel count implied by the dimensions
        expected: usize,
        /// Pixel count actually supplied
        got: usize,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when `width * height` overflows or a byte buffer is not a
    /// whole number of RGBA pixels.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::ShapeMismatch`] error.
    #[inline]
    pub fn shape_mismatch(expected: usize, got: usize) -> Self {
        Self::ShapeMismatch { expected, got }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this is a shape or dimension error.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. } | Self::InvalidDimensions { .. })
    }
}
