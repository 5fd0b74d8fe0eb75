//! Format detection utilities.
//!
//! Formats are sniffed from magic bytes. Telling a greyscale JPEG apart and
//! reading dimensions without decoding pixels are left to the codec crates'
//! header readers.

use std::fmt;
use std::io::{BufRead, Cursor, Seek, SeekFrom};
use std::path::Path;

use imgkit_core::ImageSize;
use tracing::debug;

use crate::{IoError, IoResult};

/// Recognized image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unrecognized bytes.
    #[default]
    Invalid,
    /// PNG format.
    Png,
    /// Color JPEG.
    Jpeg,
    /// Single-component JPEG.
    GrayscaleJpeg,
    /// Windows bitmap.
    Bmp,
    /// Windows icon.
    Ico,
    /// OpenEXR (detected only).
    Exr,
    /// Apple icon image (detected only).
    Icns,
}

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];
const EXR_MAGIC: [u8; 4] = [0x76, 0x2f, 0x31, 0x01];
const ICO_MAGIC: [u8; 4] = [0x00, 0x00, 0x01, 0x00];

/// Magic number check only; every JPEG is reported as [`ImageFormat::Jpeg`].
fn sniff(bytes: &[u8]) -> ImageFormat {
    if bytes.starts_with(&PNG_MAGIC) {
        ImageFormat::Png
    } else if bytes.starts_with(&JPEG_MAGIC) {
        ImageFormat::Jpeg
    } else if bytes.starts_with(&EXR_MAGIC) {
        ImageFormat::Exr
    } else if bytes.starts_with(b"icns") {
        ImageFormat::Icns
    } else if bytes.len() >= 6 && bytes.starts_with(b"BM") {
        ImageFormat::Bmp
    } else if bytes.len() >= 6 && bytes.starts_with(&ICO_MAGIC) {
        ImageFormat::Ico
    } else {
        ImageFormat::Invalid
    }
}

/// True when the JPEG frame header declares a single luma component.
#[cfg(feature = "jpeg")]
fn is_greyscale_jpeg<R: std::io::Read>(reader: R) -> bool {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    if decoder.read_info().is_err() {
        return false;
    }
    matches!(
        decoder.info().map(|i| i.pixel_format),
        Some(jpeg_decoder::PixelFormat::L8 | jpeg_decoder::PixelFormat::L16)
    )
}

#[cfg(not(feature = "jpeg"))]
fn is_greyscale_jpeg<R: std::io::Read>(_reader: R) -> bool {
    false
}

impl ImageFormat {
    /// Detects format from raw bytes (magic number check).
    ///
    /// Single-component JPEGs are [`ImageFormat::GrayscaleJpeg`].
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_reader(&mut Cursor::new(bytes)).unwrap_or_default()
    }

    /// Detects format from the start of a seekable stream.
    ///
    /// The stream is rewound to where it started before returning.
    pub fn from_reader<R: BufRead + Seek>(reader: &mut R) -> IoResult<Self> {
        let start = reader.stream_position()?;
        let mut format = sniff(reader.fill_buf()?);
        if format == ImageFormat::Jpeg && is_greyscale_jpeg(&mut *reader) {
            format = ImageFormat::GrayscaleJpeg;
        }
        reader.seek(SeekFrom::Start(start))?;
        debug!(%format, "detected format");
        Ok(format)
    }

    /// Detects format from file extension only.
    ///
    /// JPEG extensions always map to [`ImageFormat::Jpeg`]; telling a
    /// greyscale JPEG apart needs the bytes.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => ImageFormat::Png,
            Some("jpg") | Some("jpeg") | Some("jpe") => ImageFormat::Jpeg,
            Some("bmp") | Some("dib") => ImageFormat::Bmp,
            Some("ico") => ImageFormat::Ico,
            Some("exr") => ImageFormat::Exr,
            Some("icns") => ImageFormat::Icns,
            _ => ImageFormat::Invalid,
        }
    }

    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg | ImageFormat::GrayscaleJpeg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Ico => "ico",
            ImageFormat::Exr => "exr",
            ImageFormat::Icns => "icns",
            ImageFormat::Invalid => "",
        }
    }

    /// True when this build can turn the format into a pixel buffer.
    pub fn is_decodable(&self) -> bool {
        match self {
            ImageFormat::Png => cfg!(feature = "png"),
            ImageFormat::Jpeg | ImageFormat::GrayscaleJpeg => cfg!(feature = "jpeg"),
            ImageFormat::Bmp | ImageFormat::Ico => cfg!(feature = "bmp"),
            ImageFormat::Exr | ImageFormat::Icns | ImageFormat::Invalid => false,
        }
    }

    /// True when this build can write the format.
    pub fn is_encodable(&self) -> bool {
        match self {
            ImageFormat::Png => cfg!(feature = "png"),
            ImageFormat::Jpeg | ImageFormat::GrayscaleJpeg => cfg!(feature = "jpeg"),
            ImageFormat::Bmp => cfg!(feature = "bmp"),
            _ => false,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFormat::Invalid => "invalid",
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::GrayscaleJpeg => "greyscale JPEG",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Ico => "ICO",
            ImageFormat::Exr => "EXR",
            ImageFormat::Icns => "ICNS",
        })
    }
}

/// Image dimensions from the header alone.
///
/// # Errors
///
/// - [`IoError::UnrecognizedFormat`] for unknown bytes
/// - [`IoError::UnsupportedFormat`] for EXR, ICNS or a disabled codec feature
/// - [`IoError::DecodeError`] for a truncated or corrupt header
pub fn probe_size(bytes: &[u8]) -> IoResult<ImageSize> {
    size_from_reader(Cursor::new(bytes))
}

/// [`probe_size`] over a seekable stream, reading only what the header
/// parser of the matching codec needs.
pub fn size_from_reader<R: BufRead + Seek>(mut reader: R) -> IoResult<ImageSize> {
    let start = reader.stream_position()?;
    let format = sniff(reader.fill_buf()?);
    reader.seek(SeekFrom::Start(start))?;

    match format {
        #[cfg(feature = "png")]
        ImageFormat::Png => {
            let header = png::Decoder::new(reader)
                .read_info()
                .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
            let info = header.info();
            Ok(ImageSize::new(info.width, info.height))
        }
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg | ImageFormat::GrayscaleJpeg => {
            let mut decoder = jpeg_decoder::Decoder::new(reader);
            decoder
                .read_info()
                .map_err(|e| IoError::DecodeError(e.to_string()))?;
            let info = decoder
                .info()
                .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;
            Ok(ImageSize::new(info.width as u32, info.height as u32))
        }
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp | ImageFormat::Ico => {
            let ext = if format == ImageFormat::Bmp {
                image::ImageFormat::Bmp
            } else {
                image::ImageFormat::Ico
            };
            let (width, height) = image::ImageReader::with_format(reader, ext)
                .into_dimensions()
                .map_err(|e| IoError::DecodeError(e.to_string()))?;
            Ok(ImageSize::new(width, height))
        }
        ImageFormat::Invalid => Err(IoError::UnrecognizedFormat),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}
