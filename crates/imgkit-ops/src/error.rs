//! Error types for pixel buffer transforms.

use thiserror::Error;

/// Error type for pixel buffer transforms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Buffer length does not match the declared dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Images have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Strict division hit a zero divisor channel.
    #[error("division by zero at pixel {index}, channel {channel}")]
    DivisionByZero {
        /// Pixel index in the divisor buffer
        index: usize,
        /// Channel name (`r`, `g`, `b` or `a`)
        channel: char,
    },

    /// Error from the core data model.
    #[error(transparent)]
    Core(#[from] imgkit_core::Error),
}

/// Result type for pixel buffer transforms.
pub type OpsResult<T> = Result<T, OpsError>;

/// Reject buffers whose length is not `width * height`.
pub(crate) fn check_shape(len: usize, width: u32, height: u32) -> OpsResult<usize> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| OpsError::InvalidDimensions(format!("{width}x{height} overflows")))?;
    if len != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {expected} pixels for {width}x{height}, got {len}"
        )));
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_shape() {
        assert_eq!(check_shape(6, 3, 2).unwrap(), 6);
        assert!(matches!(check_shape(5, 3, 2), Err(OpsError::InvalidDimensions(_))));
        assert_eq!(check_shape(0, 0, 7).unwrap(), 0);
    }

    #[test]
    fn test_core_error_converts() {
        let err: OpsError = imgkit_core::Error::shape_mismatch(4, 3).into();
        assert!(err.to_string().contains("expected 4"));
    }
}
