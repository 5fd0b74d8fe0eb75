//! Parallel convolution using Rayon.
//!
//! Output rows are disjoint and the source is read-only, so rows are
//! computed independently with `par_chunks_mut`. Results are identical to
//! [`crate::filter::apply_filter`].
//!
//! # Example
//!
//! ```rust
//! use imgkit_core::Rgba8;
//! use imgkit_ops::kernels::{get_bitmap_filter, BitmapFilterType};
//! use imgkit_ops::parallel;
//!
//! let src = vec![Rgba8::opaque(10, 20, 30); 256 * 256];
//! let f = get_bitmap_filter(BitmapFilterType::Gaussian1, None);
//! let out = parallel::apply_filter(&src, 256, 256, &f).unwrap();
//! assert_eq!(out.len(), src.len());
//! ```

use imgkit_core::{PixelBuffer, Rgba8};
use rayon::prelude::*;
use tracing::trace;

use crate::error::check_shape;
use crate::filter::PreparedFilter;
use crate::kernels::BitmapFilter;
use crate::OpsResult;

/// Row-parallel [`crate::filter::apply_filter`].
pub fn apply_filter(pixels: &[Rgba8], width: u32, height: u32, filter: &BitmapFilter) -> OpsResult<Vec<Rgba8>> {
    trace!(width, height, kernel_w = filter.width, kernel_h = filter.height, "parallel::apply_filter");

    let len = check_shape(pixels.len(), width, height)?;
    if len == 0 {
        return Ok(Vec::new());
    }

    let prepared = PreparedFilter::new(filter)?;
    let (w, h) = (width as usize, height as usize);
    let mut dst = vec![Rgba8::TRANSPARENT; len];
    dst.par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| prepared.filter_row(pixels, w, h, y, row));
    Ok(dst)
}

/// Row-parallel [`crate::filter::apply_filter_buffer`].
pub fn apply_filter_buffer(buffer: &PixelBuffer, filter: &BitmapFilter) -> OpsResult<PixelBuffer> {
    let pixels = apply_filter(buffer.pixels(), buffer.width(), buffer.height(), filter)?;
    Ok(buffer.with_pixels(pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter;
    use crate::kernels::{BitmapFilterType, EdgeMode, get_bitmap_filter};

    fn noise(w: u32, h: u32) -> Vec<Rgba8> {
        let mut state = 0x2545_f491u32;
        (0..w * h)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                Rgba8::from_array(state.to_le_bytes())
            })
            .collect()
    }

    #[test]
    fn test_matches_sequential() {
        let src = noise(37, 23);
        for kind in BitmapFilterType::ALL {
            for edge in [EdgeMode::FlatIndex, EdgeMode::Clamp] {
                let f = get_bitmap_filter(kind, None).with_edge_mode(edge);
                let seq = filter::apply_filter(&src, 37, 23, &f).unwrap();
                let par = apply_filter(&src, 37, 23, &f).unwrap();
                assert_eq!(seq, par, "{kind} {edge}");
            }
        }
    }

    #[test]
    fn test_shape_checked() {
        let f = BitmapFilter::default();
        assert!(apply_filter(&noise(4, 4), 4, 5, &f).is_err());
        assert!(apply_filter(&[], 0, 3, &f).unwrap().is_empty());
    }
}
