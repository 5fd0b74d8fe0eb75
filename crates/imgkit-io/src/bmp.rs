//! BMP and ICO codecs backed by the `image` crate.
//!
//! ICO is read-only: the largest entry the `image` decoder picks is
//! returned.

use image::codecs::bmp::BmpEncoder;
use image::{DynamicImage, ImageFormat as ExtFormat, RgbaImage};
use imgkit_core::PixelBuffer;
use tracing::trace;

use crate::{IoError, IoResult};

fn decode_as(bytes: &[u8], format: ExtFormat) -> IoResult<PixelBuffer> {
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| IoError::DecodeError(e.to_string()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    trace!(width, height, ?format, "image-rs decode");
    Ok(PixelBuffer::from_rgba_bytes(width, height, img.as_raw())?)
}

/// Decodes BMP bytes.
pub fn decode_bmp(bytes: &[u8]) -> IoResult<PixelBuffer> {
    decode_as(bytes, ExtFormat::Bmp)
}

/// Decodes ICO bytes.
pub fn decode_ico(bytes: &[u8]) -> IoResult<PixelBuffer> {
    decode_as(bytes, ExtFormat::Ico)
}

/// Encodes a pixel buffer as 32-bit BMP.
pub fn encode_bmp(buffer: &PixelBuffer) -> IoResult<Vec<u8>> {
    let img = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.to_rgba_bytes())
        .ok_or_else(|| IoError::EncodeError("failed to create RGBA image".into()))?;
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_with_encoder(BmpEncoder::new(&mut out))
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{probe_size, ImageFormat};
    use imgkit_core::{ImageSize, Rgba8};

    #[test]
    fn test_bmp_roundtrip() {
        let pixels = (0..12u8).map(|i| Rgba8::opaque(i * 20, 255 - i * 20, i)).collect();
        let buf = PixelBuffer::new(4, 3, pixels).unwrap();
        let bytes = encode_bmp(&buf).unwrap();

        assert_eq!(ImageFormat::from_bytes(&bytes), ImageFormat::Bmp);
        assert_eq!(probe_size(&bytes).unwrap(), ImageSize::new(4, 3));
        assert_eq!(decode_bmp(&bytes).unwrap(), buf);
    }

    #[test]
    fn test_truncated_bmp() {
        assert!(matches!(decode_bmp(b"BM\0\0\0\0"), Err(IoError::DecodeError(_))));
    }
}
