//! Error types for codec and file operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Bytes do not match any known signature.
    #[error("unrecognized image format")]
    UnrecognizedFormat,

    /// Format is known but cannot be read or written here.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Refused to encode a buffer with no pixels.
    #[error("cannot encode an empty image")]
    EmptyImage,

    /// Decoded data violated the pixel buffer invariants.
    #[error(transparent)]
    Core(#[from] imgkit_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
