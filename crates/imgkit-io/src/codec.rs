//! Byte-level codec dispatch and the collaborator traits.
//!
//! [`decode`] sniffs the format from magic bytes and [`encode`] writes the
//! requested format. [`Codec`] wraps both behind [`BitmapDecoder`] and
//! [`BitmapEncoder`] so callers can swap in their own implementation.

use std::path::{Path, PathBuf};

use imgkit_core::PixelBuffer;
use tracing::{debug, trace};

use crate::detect::ImageFormat;
use crate::{IoError, IoResult};

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Turns encoded bytes into pixels.
pub trait BitmapDecoder {
    /// Decodes `bytes`, returning the pixels and the detected format.
    fn decode(&self, bytes: &[u8]) -> IoResult<(PixelBuffer, ImageFormat)>;
}

/// Turns pixels into encoded bytes.
pub trait BitmapEncoder {
    /// Encodes `buffer` as `format`.
    fn encode(&self, buffer: &PixelBuffer, format: ImageFormat) -> IoResult<Vec<u8>>;
}

/// Receives finished buffers for display or storage.
pub trait Presenter {
    /// Shows or stores one frame.
    fn present(&mut self, buffer: &PixelBuffer) -> IoResult<()>;
}

/// Built-in codec set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Codec {
    /// Codec with a custom JPEG quality.
    pub fn with_jpeg_quality(quality: u8) -> Self {
        Self { jpeg_quality: quality }
    }
}

impl BitmapDecoder for Codec {
    fn decode(&self, bytes: &[u8]) -> IoResult<(PixelBuffer, ImageFormat)> {
        let format = ImageFormat::from_bytes(bytes);
        trace!(%format, len = bytes.len(), "decode");
        let buffer = match format {
            #[cfg(feature = "png")]
            ImageFormat::Png => crate::png::decode(bytes)?,
            #[cfg(feature = "jpeg")]
            ImageFormat::Jpeg | ImageFormat::GrayscaleJpeg => crate::jpeg::decode(bytes)?,
            #[cfg(feature = "bmp")]
            ImageFormat::Bmp => crate::bmp::decode_bmp(bytes)?,
            #[cfg(feature = "bmp")]
            ImageFormat::Ico => crate::bmp::decode_ico(bytes)?,
            ImageFormat::Invalid => return Err(IoError::UnrecognizedFormat),
            #[allow(unreachable_patterns)]
            other => return Err(IoError::UnsupportedFormat(other.to_string())),
        };
        Ok((buffer, format))
    }
}

impl BitmapEncoder for Codec {
    fn encode(&self, buffer: &PixelBuffer, format: ImageFormat) -> IoResult<Vec<u8>> {
        if buffer.is_empty() {
            return Err(IoError::EmptyImage);
        }
        trace!(%format, width = buffer.width(), height = buffer.height(), "encode");
        match format {
            #[cfg(feature = "png")]
            ImageFormat::Png => crate::png::encode(buffer),
            #[cfg(feature = "jpeg")]
            ImageFormat::Jpeg | ImageFormat::GrayscaleJpeg => crate::jpeg::encode(buffer, self.jpeg_quality),
            #[cfg(feature = "bmp")]
            ImageFormat::Bmp => crate::bmp::encode_bmp(buffer),
            #[allow(unreachable_patterns)]
            other => Err(IoError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Decodes bytes with the default [`Codec`].
///
/// # Errors
///
/// - [`IoError::UnrecognizedFormat`] when no signature matches
/// - [`IoError::UnsupportedFormat`] for EXR, ICNS or disabled features
/// - [`IoError::DecodeError`] for corrupt data
pub fn decode(bytes: &[u8]) -> IoResult<(PixelBuffer, ImageFormat)> {
    Codec::default().decode(bytes)
}

/// Encodes with the default [`Codec`].
///
/// # Errors
///
/// [`IoError::EmptyImage`] for a buffer without pixels,
/// [`IoError::UnsupportedFormat`] for formats without a writer.
pub fn encode(buffer: &PixelBuffer, format: ImageFormat) -> IoResult<Vec<u8>> {
    Codec::default().encode(buffer, format)
}

/// Presenter that writes each frame to a file.
#[derive(Debug, Clone)]
pub struct FilePresenter {
    path: PathBuf,
    format: ImageFormat,
    codec: Codec,
}

impl FilePresenter {
    /// Writes to `path`, picking the format from its extension.
    pub fn new<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let format = ImageFormat::from_extension(&path);
        if !format.is_encodable() {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {} ({})",
                path.display(),
                format
            )));
        }
        Ok(Self {
            path,
            format,
            codec: Codec::default(),
        })
    }

    /// Replaces the codec used for encoding.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Target format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

impl Presenter for FilePresenter {
    fn present(&mut self, buffer: &PixelBuffer) -> IoResult<()> {
        let bytes = self.codec.encode(buffer, self.format)?;
        std::fs::write(&self.path, &bytes)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "presented");
        Ok(())
    }
}
