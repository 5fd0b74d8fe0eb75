//! Bitmap resampling.
//!
//! - [`ResizeFilter::Nearest`] - point sampling, no blending
//! - [`ResizeFilter::Bilinear`] - triangle filter, widened when minifying
//! - [`ResizeFilter::Box`] - area average
//!
//! Weighted filters run as two separable passes (horizontal, then vertical)
//! over all four channels in `f32`, rounded back to 8-bit at the end.
//!
//! # Example
//!
//! ```rust
//! use imgkit_core::{ImageSize, Rgba8};
//! use imgkit_ops::resize::{resize_bitmap, ResizeFilter};
//!
//! let src = vec![Rgba8::opaque(50, 100, 150); 4 * 4];
//! let dst = resize_bitmap(&src, ImageSize::new(4, 4), ImageSize::new(8, 2), ResizeFilter::Bilinear).unwrap();
//! assert_eq!(dst.len(), 16);
//! assert!(dst.iter().all(|p| *p == Rgba8::opaque(50, 100, 150)));
//! ```

use std::fmt;
use std::str::FromStr;

use imgkit_core::{ImageSize, PixelBuffer, Rgba8};
use tracing::trace;

use crate::error::check_shape;
use crate::{OpsError, OpsResult};

/// Resampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResizeFilter {
    /// Nearest-neighbor.
    Nearest,
    /// Bilinear (triangle).
    #[default]
    Bilinear,
    /// Box (area average).
    Box,
}

impl ResizeFilter {
    /// Support radius in source pixels at scale 1.
    #[inline]
    fn support(self) -> f32 {
        match self {
            ResizeFilter::Nearest | ResizeFilter::Box => 0.5,
            ResizeFilter::Bilinear => 1.0,
        }
    }

    /// Weight at distance `x`.
    #[inline]
    fn weight(self, x: f32) -> f32 {
        let ax = x.abs();
        match self {
            ResizeFilter::Nearest | ResizeFilter::Box => {
                if ax <= 0.5 { 1.0 } else { 0.0 }
            }
            ResizeFilter::Bilinear => {
                if ax < 1.0 { 1.0 - ax } else { 0.0 }
            }
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Bilinear => "bilinear",
            ResizeFilter::Box => "box",
        })
    }
}

impl FromStr for ResizeFilter {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" | "point" => Ok(ResizeFilter::Nearest),
            "bilinear" | "linear" | "triangle" => Ok(ResizeFilter::Bilinear),
            "box" | "area" => Ok(ResizeFilter::Box),
            other => Err(OpsError::InvalidParameter(format!("unknown resize filter '{other}'"))),
        }
    }
}

/// Resample `pixels` from `size` to `new_size`.
///
/// An empty input or any zero dimension yields an empty vector.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] when `pixels.len()` does not match `size`.
pub fn resize_bitmap(
    pixels: &[Rgba8],
    size: ImageSize,
    new_size: ImageSize,
    filter: ResizeFilter,
) -> OpsResult<Vec<Rgba8>> {
    trace!(
        src_w = size.width,
        src_h = size.height,
        dst_w = new_size.width,
        dst_h = new_size.height,
        %filter,
        "resize_bitmap"
    );

    if pixels.is_empty() || size.is_empty() || new_size.is_empty() {
        return Ok(Vec::new());
    }
    check_shape(pixels.len(), size.width, size.height)?;
    let dst_len = new_size.pixel_count()?;

    let (sw, sh) = (size.width as usize, size.height as usize);
    let (dw, dh) = (new_size.width as usize, new_size.height as usize);

    if filter == ResizeFilter::Nearest {
        return Ok(resize_nearest(pixels, sw, sh, dw, dh, dst_len));
    }

    let src: Vec<[f32; 4]> = pixels
        .iter()
        .map(|p| [p.r as f32, p.g as f32, p.b as f32, p.a as f32])
        .collect();

    // Horizontal pass: sw x sh -> dw x sh
    let mut temp = vec![[0.0f32; 4]; dw * sh];
    for x in 0..dw {
        let taps = contributions(x, sw, dw, filter);
        for y in 0..sh {
            temp[y * dw + x] = accumulate(&taps, |sx| src[y * sw + sx]);
        }
    }

    // Vertical pass: dw x sh -> dw x dh
    let mut dst = Vec::with_capacity(dst_len);
    for y in 0..dh {
        let taps = contributions(y, sh, dh, filter);
        for x in 0..dw {
            let [r, g, b, a] = accumulate(&taps, |sy| temp[sy * dw + x]);
            dst.push(Rgba8::new(quantize(r), quantize(g), quantize(b), quantize(a)));
        }
    }
    Ok(dst)
}

/// [`resize_bitmap`] over a [`PixelBuffer`].
pub fn resize_buffer(buffer: &PixelBuffer, new_size: ImageSize, filter: ResizeFilter) -> OpsResult<PixelBuffer> {
    let pixels = resize_bitmap(buffer.pixels(), buffer.size(), new_size, filter)?;
    if pixels.is_empty() {
        return Ok(PixelBuffer::default());
    }
    Ok(PixelBuffer::new(new_size.width, new_size.height, pixels)?)
}

fn resize_nearest(src: &[Rgba8], sw: usize, sh: usize, dw: usize, dh: usize, len: usize) -> Vec<Rgba8> {
    let mut dst = Vec::with_capacity(len);
    for y in 0..dh {
        let sy = ((y * sh) / dh).min(sh - 1);
        for x in 0..dw {
            let sx = ((x * sw) / dw).min(sw - 1);
            dst.push(src[sy * sw + sx]);
        }
    }
    dst
}

/// Normalized `(source index, weight)` pairs for one destination sample.
fn contributions(dst: usize, src_len: usize, dst_len: usize, filter: ResizeFilter) -> Vec<(usize, f32)> {
    let scale = src_len as f32 / dst_len as f32;
    let stretch = scale.max(1.0);
    let support = filter.support() * stretch;
    let center = (dst as f32 + 0.5) * scale - 0.5;

    let lo = ((center - support).floor().max(0.0)) as usize;
    let hi = ((center + support).ceil().max(0.0) as usize).min(src_len - 1);

    let mut taps: Vec<(usize, f32)> = (lo..=hi)
        .map(|s| (s, filter.weight((s as f32 - center) / stretch)))
        .filter(|&(_, w)| w > 0.0)
        .collect();

    let total: f32 = taps.iter().map(|&(_, w)| w).sum();
    if total > 0.0 {
        for (_, w) in &mut taps {
            *w /= total;
        }
    } else {
        // Degenerate footprint: fall back to the nearest source sample.
        let nearest = (center.round().max(0.0) as usize).min(src_len - 1);
        taps = vec![(nearest, 1.0)];
    }
    taps
}

#[inline]
fn accumulate(taps: &[(usize, f32)], sample: impl Fn(usize) -> [f32; 4]) -> [f32; 4] {
    let mut sum = [0.0f32; 4];
    for &(i, w) in taps {
        let s = sample(i);
        for c in 0..4 {
            sum[c] += s[c] * w;
        }
    }
    sum
}

#[inline]
fn quantize(v: f32) -> u8 {
    imgkit_core::clamp(v.round(), 0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(w: u32, h: u32) -> Vec<Rgba8> {
        (0..w * h)
            .map(|i| if (i % w + i / w) % 2 == 0 { Rgba8::BLACK } else { Rgba8::WHITE })
            .collect()
    }

    #[test]
    fn test_zero_sizes_are_empty() {
        let src = checker(4, 4);
        let cases = [
            (ImageSize::new(0, 4), ImageSize::new(2, 2)),
            (ImageSize::new(4, 4), ImageSize::new(0, 2)),
            (ImageSize::new(4, 4), ImageSize::new(2, 0)),
        ];
        for (from, to) in cases {
            let out = resize_bitmap(&src, from, to, ResizeFilter::Bilinear).unwrap();
            assert!(out.is_empty());
        }
        assert!(resize_bitmap(&[], ImageSize::new(4, 4), ImageSize::new(2, 2), ResizeFilter::Box)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_shape_mismatch() {
        let err = resize_bitmap(&checker(4, 4), ImageSize::new(5, 4), ImageSize::new(2, 2), ResizeFilter::Box);
        assert!(matches!(err, Err(OpsError::InvalidDimensions(_))));
    }

    #[test]
    fn test_same_size_is_identity() {
        let src = checker(5, 3);
        for filter in [ResizeFilter::Nearest, ResizeFilter::Bilinear, ResizeFilter::Box] {
            let out = resize_bitmap(&src, ImageSize::new(5, 3), ImageSize::new(5, 3), filter).unwrap();
            assert_eq!(out, src, "{filter}");
        }
    }

    #[test]
    fn test_nearest_upscale_replicates() {
        let src = vec![Rgba8::BLACK, Rgba8::WHITE];
        let out = resize_bitmap(&src, ImageSize::new(2, 1), ImageSize::new(4, 1), ResizeFilter::Nearest).unwrap();
        assert_eq!(out, vec![Rgba8::BLACK, Rgba8::BLACK, Rgba8::WHITE, Rgba8::WHITE]);
    }

    #[test]
    fn test_box_downscale_averages() {
        let src = checker(4, 4);
        let out = resize_bitmap(&src, ImageSize::new(4, 4), ImageSize::new(2, 2), ResizeFilter::Box).unwrap();
        assert_eq!(out.len(), 4);
        for p in out {
            assert_eq!(p.a, 255);
            assert!((p.r as i32 - 128).abs() <= 1, "{p:?}");
        }
    }

    #[test]
    fn test_buffer_wrapper() {
        let buf = PixelBuffer::filled(3, 3, Rgba8::new(1, 2, 3, 4)).unwrap();
        let out = resize_buffer(&buf, ImageSize::new(6, 1), ResizeFilter::Bilinear).unwrap();
        assert_eq!(out.size(), ImageSize::new(6, 1));
        assert!(out.pixels().iter().all(|p| *p == Rgba8::new(1, 2, 3, 4)));
        assert!(resize_buffer(&buf, ImageSize::new(0, 1), ResizeFilter::Box).unwrap().is_empty());
    }

    #[test]
    fn test_parse() {
        assert_eq!("area".parse::<ResizeFilter>().unwrap(), ResizeFilter::Box);
        assert!("lanczos".parse::<ResizeFilter>().is_err());
    }
}
