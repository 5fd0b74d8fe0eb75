//! PNG codec.
//!
//! Palette, low bit depth and `tRNS` inputs are expanded and 16-bit samples
//! are stripped, so every image arrives as 8-bit grey, grey+alpha, RGB or
//! RGBA before it is widened to [`Rgba8`]. Output is always 8-bit RGBA.

use std::io::Cursor;

use imgkit_core::{PixelBuffer, Rgba8};
use tracing::trace;

use crate::{IoError, IoResult};

/// Decodes PNG bytes into a pixel buffer.
pub fn decode(bytes: &[u8]) -> IoResult<PixelBuffer> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());
    trace!(width = info.width, height = info.height, color = ?info.color_type, "png decode");

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::DecodeError(format!(
            "unexpected bit depth after expansion: {:?}",
            info.bit_depth
        )));
    }

    let pixels: Vec<Rgba8> = match info.color_type {
        png::ColorType::Rgba => buf.chunks_exact(4).map(|p| Rgba8::new(p[0], p[1], p[2], p[3])).collect(),
        png::ColorType::Rgb => buf.chunks_exact(3).map(|p| Rgba8::opaque(p[0], p[1], p[2])).collect(),
        png::ColorType::GrayscaleAlpha => {
            buf.chunks_exact(2).map(|p| Rgba8::new(p[0], p[0], p[0], p[1])).collect()
        }
        png::ColorType::Grayscale => buf.iter().map(|&g| Rgba8::opaque(g, g, g)).collect(),
        png::ColorType::Indexed => {
            return Err(IoError::DecodeError("palette was not expanded".into()));
        }
    };

    Ok(PixelBuffer::new(info.width, info.height, pixels)?)
}

/// Encodes a pixel buffer as 8-bit RGBA PNG.
pub fn encode(buffer: &PixelBuffer) -> IoResult<Vec<u8>> {
    trace!(width = buffer.width(), height = buffer.height(), "png encode");
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        writer
            .write_image_data(&buffer.to_rgba_bytes())
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        writer.finish().map_err(|e| IoError::EncodeError(e.to_string()))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_keeps_alpha() {
        let pixels = vec![
            Rgba8::new(255, 0, 0, 255),
            Rgba8::new(0, 255, 0, 128),
            Rgba8::new(0, 0, 255, 0),
            Rgba8::new(10, 20, 30, 40),
            Rgba8::WHITE,
            Rgba8::BLACK,
        ];
        let buf = PixelBuffer::new(3, 2, pixels).unwrap();
        let bytes = encode(&buf).unwrap();
        assert_eq!(decode(&bytes).unwrap(), buf);
    }

    #[test]
    fn test_greyscale_widens() {
        let mut out = Vec::new();
        {
            let mut enc = png::Encoder::new(&mut out, 2, 1);
            enc.set_color(png::ColorType::Grayscale);
            enc.set_depth(png::BitDepth::Eight);
            let mut w = enc.write_header().unwrap();
            w.write_image_data(&[7, 200]).unwrap();
        }
        let buf = decode(&out).unwrap();
        assert_eq!(buf.pixels(), &[Rgba8::opaque(7, 7, 7), Rgba8::opaque(200, 200, 200)]);
    }

    #[test]
    fn test_sixteen_bit_is_stripped() {
        let mut out = Vec::new();
        {
            let mut enc = png::Encoder::new(&mut out, 1, 1);
            enc.set_color(png::ColorType::Rgb);
            enc.set_depth(png::BitDepth::Sixteen);
            let mut w = enc.write_header().unwrap();
            w.write_image_data(&[0xAB, 0x01, 0x12, 0x34, 0xFF, 0xFF]).unwrap();
        }
        let buf = decode(&out).unwrap();
        assert_eq!(buf.pixels(), &[Rgba8::opaque(0xAB, 0x12, 0xFF)]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(decode(b"not a png"), Err(IoError::DecodeError(_))));
    }
}
