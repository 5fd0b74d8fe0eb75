//! Kernel convolution over 8-bit RGBA buffers.
//!
//! For every output pixel `(x, y)` the engine walks the kernel footprint and
//! accumulates, for R, G and B:
//!
//! ```text
//! acc += src(x + kx - kw/2, y + ky - kh/2).c * (weight[ky*kw + kx] * factor) + bias
//! ```
//!
//! Alpha is not convolved. It is the center source pixel's alpha when the
//! channel mode is [`ChannelMode::Rgba`] and 255 otherwise. The accumulated
//! triple is then clamped, rounded and projected through
//! [`isolate_accumulated`].
//!
//! Accumulation happens in `f32`, so intermediate sums never wrap.
//!
//! # Borders
//!
//! See [`EdgeMode`]. With [`EdgeMode::FlatIndex`] a tap left of column 0
//! reads the last pixels of the previous row; with [`EdgeMode::Clamp`] it
//! reads column 0 of the same row.
//!
//! # Example
//!
//! ```rust
//! use imgkit_core::Rgba8;
//! use imgkit_ops::filter::apply_filter;
//! use imgkit_ops::kernels::{get_bitmap_filter, BitmapFilterType};
//!
//! let src = vec![Rgba8::new(90, 60, 30, 200); 8 * 8];
//! let blur = get_bitmap_filter(BitmapFilterType::BoxBlur, None);
//! let out = apply_filter(&src, 8, 8, &blur).unwrap();
//! assert_eq!(out, src);
//! ```

use imgkit_core::{isolate_accumulated, ChannelMode, PixelBuffer, Rgba8};
use tracing::{debug, trace};

use crate::error::check_shape;
use crate::kernels::{BitmapFilter, EdgeMode};
use crate::OpsResult;

/// A filter with weights pre-scaled by the factor. Taps past the supplied
/// weights reuse `fill`.
#[derive(Debug, Clone)]
pub(crate) struct PreparedFilter {
    taps: Vec<f32>,
    fill: f32,
    kw: usize,
    kh: usize,
    rx: isize,
    ry: isize,
    bias: f32,
    mode: ChannelMode,
    edge: EdgeMode,
}

impl PreparedFilter {
    pub(crate) fn new(filter: &BitmapFilter) -> OpsResult<Self> {
        filter.check_size()?;
        let kw = filter.width as usize;
        let kh = filter.height as usize;

        if !filter.is_well_formed() {
            debug!(
                kernel_w = filter.width,
                kernel_h = filter.height,
                weights = filter.weights.len(),
                "malformed kernel, clamping weight indices"
            );
        }

        // Missing weights repeat the last one; an empty list weighs nothing.
        let taps: Vec<f32> = filter.weights.iter().map(|w| w * filter.factor).collect();
        let fill = taps.last().copied().unwrap_or(0.0);

        Ok(Self {
            taps,
            fill,
            kw,
            kh,
            rx: (kw / 2) as isize,
            ry: (kh / 2) as isize,
            bias: filter.bias,
            mode: filter.channel_mode,
            edge: filter.edge_mode,
        })
    }

    #[inline]
    fn tap(&self, i: usize) -> f32 {
        self.taps.get(i).copied().unwrap_or(self.fill)
    }

    /// Compute one output row into `row`.
    pub(crate) fn filter_row(&self, src: &[Rgba8], width: usize, height: usize, y: usize, row: &mut [Rgba8]) {
        let last = src.len() as isize - 1;
        let w = width as isize;
        let h = height as isize;

        for (x, out) in row.iter_mut().enumerate() {
            let mut acc = [0.0f32; 3];

            for ky in 0..self.kh {
                let sy = y as isize + ky as isize - self.ry;
                for kx in 0..self.kw {
                    let sx = x as isize + kx as isize - self.rx;
                    let idx = match self.edge {
                        EdgeMode::FlatIndex => (sy * w + sx).clamp(0, last),
                        EdgeMode::Clamp => sy.clamp(0, h - 1) * w + sx.clamp(0, w - 1),
                    };

                    let p = src[idx as usize];
                    let k = self.tap(ky * self.kw + kx);
                    acc[0] += p.r as f32 * k + self.bias;
                    acc[1] += p.g as f32 * k + self.bias;
                    acc[2] += p.b as f32 * k + self.bias;
                }
            }

            let alpha = match self.mode {
                ChannelMode::Rgba => src[y * width + x].a,
                _ => 255,
            };
            *out = isolate_accumulated(acc, alpha, self.mode);
        }
    }
}

/// Convolve `pixels` (`width * height`, row-major) with `filter`.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`](crate::OpsError::InvalidDimensions) when
/// the buffer length does not match the dimensions, and
/// [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter) when the
/// kernel is wider or taller than
/// [`MAX_KERNEL_SIZE`](crate::kernels::MAX_KERNEL_SIZE). An empty image
/// yields an empty result.
pub fn apply_filter(pixels: &[Rgba8], width: u32, height: u32, filter: &BitmapFilter) -> OpsResult<Vec<Rgba8>> {
    trace!(
        width,
        height,
        kernel_w = filter.width,
        kernel_h = filter.height,
        mode = %filter.channel_mode,
        edge = %filter.edge_mode,
        "apply_filter"
    );

    let len = check_shape(pixels.len(), width, height)?;
    if len == 0 {
        return Ok(Vec::new());
    }

    let prepared = PreparedFilter::new(filter)?;
    let (w, h) = (width as usize, height as usize);
    let mut dst = vec![Rgba8::TRANSPARENT; len];
    for (y, row) in dst.chunks_mut(w).enumerate() {
        prepared.filter_row(pixels, w, h, y, row);
    }
    Ok(dst)
}

/// [`apply_filter`] over a [`PixelBuffer`].
pub fn apply_filter_buffer(buffer: &PixelBuffer, filter: &BitmapFilter) -> OpsResult<PixelBuffer> {
    let pixels = apply_filter(buffer.pixels(), buffer.width(), buffer.height(), filter)?;
    Ok(buffer.with_pixels(pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::{get_bitmap_filter, BitmapFilterType};
    use crate::OpsError;

    fn gradient(w: u32, h: u32) -> Vec<Rgba8> {
        (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                Rgba8::new((x * 20) as u8, (y * 30) as u8, ((x + y) * 10) as u8, (100 + i) as u8)
            })
            .collect()
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let f = BitmapFilter::default();
        let err = apply_filter(&[Rgba8::BLACK; 5], 3, 2, &f).unwrap_err();
        assert!(matches!(err, OpsError::InvalidDimensions(_)));
    }

    #[test]
    fn test_empty_image() {
        let f = BitmapFilter::default();
        assert!(apply_filter(&[], 0, 0, &f).unwrap().is_empty());
        assert!(apply_filter(&[], 4, 0, &f).unwrap().is_empty());
    }

    #[test]
    fn test_identity_rgba_is_exact() {
        let src = gradient(5, 4);
        let f = get_bitmap_filter(BitmapFilterType::Identity, None);
        assert_eq!(apply_filter(&src, 5, 4, &f).unwrap(), src);
    }

    #[test]
    fn test_rgb_mode_forces_alpha() {
        let src = gradient(3, 3);
        let f = BitmapFilter::default();
        let out = apply_filter(&src, 3, 3, &f).unwrap();
        for (o, i) in out.iter().zip(&src) {
            assert_eq!(*o, i.with_alpha(255));
        }
    }

    #[test]
    fn test_alpha_mode_output() {
        let src = vec![Rgba8::new(1, 2, 3, 77); 9];
        let f = BitmapFilter::default().with_channel_mode(ChannelMode::A);
        let out = apply_filter(&src, 3, 3, &f).unwrap();
        // alpha is forced to 255 before projection
        assert!(out.iter().all(|p| *p == Rgba8::new(255, 255, 255, 0)));
    }

    #[test]
    fn test_bias_is_per_tap() {
        let src = vec![Rgba8::BLACK; 9];
        let f = BitmapFilter::default().with_bias(10.0);
        let out = apply_filter(&src, 3, 3, &f).unwrap();
        assert_eq!(out[4], Rgba8::opaque(90, 90, 90));
    }

    #[test]
    fn test_accumulator_does_not_wrap() {
        let src = vec![Rgba8::opaque(200, 200, 200); 9];
        let f = BitmapFilter::new(3, 3, vec![1.0; 9]);
        let out = apply_filter(&src, 3, 3, &f).unwrap();
        assert!(out.iter().all(|p| *p == Rgba8::WHITE));
    }

    #[test]
    fn test_flat_index_wraps_rows() {
        // 3x2: row 0 dark, row 1 bright. A 3x1 horizontal tap at (0, 1)
        // reads (2, 0) under flat indexing but (0, 1) under clamping.
        let mut src = vec![Rgba8::opaque(0, 0, 0); 3];
        src.extend(vec![Rgba8::opaque(90, 90, 90); 3]);
        let f = BitmapFilter::new(3, 1, vec![1.0, 0.0, 0.0]);

        let flat = apply_filter(&src, 3, 2, &f).unwrap();
        assert_eq!(flat[3], Rgba8::BLACK);

        let clamped = apply_filter(&src, 3, 2, &f.clone().with_edge_mode(EdgeMode::Clamp)).unwrap();
        assert_eq!(clamped[3], Rgba8::opaque(90, 90, 90));
    }

    #[test]
    fn test_malformed_weights_clamp_to_last() {
        let src = vec![Rgba8::opaque(10, 10, 10); 9];
        // Only two weights: tap 0 uses 0.0, every later tap reuses 1.0.
        let f = BitmapFilter::new(3, 3, vec![0.0, 1.0]);
        let out = apply_filter(&src, 3, 3, &f).unwrap();
        assert_eq!(out[4], Rgba8::opaque(80, 80, 80));

        let empty = BitmapFilter::new(3, 3, Vec::new());
        let out = apply_filter(&src, 3, 3, &empty).unwrap();
        assert!(out.iter().all(|p| *p == Rgba8::BLACK));
    }

    #[test]
    fn test_oversized_kernel_is_rejected() {
        let src = [Rgba8::WHITE; 4];
        let f = BitmapFilter::new(u32::MAX, u32::MAX, vec![1.0]);
        let err = apply_filter(&src, 2, 2, &f).unwrap_err();
        assert!(matches!(err, OpsError::InvalidParameter(_)));
    }

    #[test]
    fn test_short_weights_on_wide_kernel() {
        // 9x9 footprint over a 2x2 image with a single supplied weight
        let src = vec![Rgba8::opaque(2, 2, 2); 4];
        let f = BitmapFilter::new(9, 9, vec![1.0]);
        let out = apply_filter(&src, 2, 2, &f).unwrap();
        assert!(out.iter().all(|p| *p == Rgba8::opaque(162, 162, 162)));
    }

    #[test]
    fn test_single_pixel_image() {
        let src = [Rgba8::new(40, 50, 60, 70)];
        let f = get_bitmap_filter(BitmapFilterType::Gaussian2, None);
        assert_eq!(apply_filter(&src, 1, 1, &f).unwrap(), src);
    }

    #[test]
    fn test_buffer_wrapper() {
        let buf = PixelBuffer::new(4, 3, gradient(4, 3)).unwrap();
        let f = get_bitmap_filter(BitmapFilterType::Sharpen, Some(ChannelMode::G));
        let out = apply_filter_buffer(&buf, &f).unwrap();
        assert_eq!(out.size(), buf.size());
        assert!(out.pixels().iter().all(|p| p.r == 0 && p.b == 0 && p.a == 255));
    }
}
