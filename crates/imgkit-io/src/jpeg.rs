//! JPEG codec.
//!
//! Decoding accepts RGB, 8/16-bit luma and CMYK frames. Encoding writes
//! baseline RGB; alpha is dropped because JPEG has no alpha channel.

use std::io::Cursor;

use imgkit_core::{PixelBuffer, Rgba8};
use tracing::{debug, trace};

use crate::{IoError, IoResult};

/// Decodes JPEG bytes into an opaque pixel buffer.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(bytes));
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;
    trace!(width = info.width, height = info.height, format = ?info.pixel_format, "jpeg decode");

    let pixels: Vec<Rgba8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => data.chunks_exact(3).map(|p| Rgba8::opaque(p[0], p[1], p[2])).collect(),
        jpeg_decoder::PixelFormat::L8 => data.iter().map(|&g| Rgba8::opaque(g, g, g)).collect(),
        // big-endian samples, keep the high byte
        jpeg_decoder::PixelFormat::L16 => data.chunks_exact(2).map(|l| Rgba8::opaque(l[0], l[0], l[0])).collect(),
        jpeg_decoder::PixelFormat::CMYK32 => data.chunks_exact(4).map(cmyk_to_rgba).collect(),
    };

    Ok(PixelBuffer::new(info.width as u32, info.height as u32, pixels)?)
}

fn cmyk_to_rgba(cmyk: &[u8]) -> Rgba8 {
    let k = 1.0 - cmyk[3] as f32 / 255.0;
    let ch = |c: u8| ((1.0 - c as f32 / 255.0) * k * 255.0) as u8;
    Rgba8::opaque(ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2]))
}

/// Encodes a pixel buffer as RGB JPEG at the given quality.
///
/// # Errors
///
/// [`IoError::EncodeError`] when either dimension exceeds 65535.
pub fn encode(buffer: &PixelBuffer, quality: u8) -> IoResult<Vec<u8>> {
    let (width, height) = match (u16::try_from(buffer.width()), u16::try_from(buffer.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "{}x{} exceeds the JPEG limit of 65535",
                buffer.width(),
                buffer.height()
            )));
        }
    };
    let quality = quality.clamp(1, 100);
    if buffer.pixels().iter().any(|p| p.a != 255) {
        debug!("jpeg encode drops alpha channel");
    }

    let rgb: Vec<u8> = buffer.pixels().iter().flat_map(|p| [p.r, p.g, p.b]).collect();
    let mut out = Vec::new();
    jpeg_encoder::Encoder::new(&mut out, quality)
        .encode(&rgb, width, height, jpeg_encoder::ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;
    Ok(out)
}
