//! Per-pixel blend arithmetic between two buffers or a buffer and a color.
//!
//! # Length policy
//!
//! Two-buffer operations pair pixels by index. The output has
//! `min(a.len(), b.len())` pixels; trailing pixels of the longer input are
//! dropped. An empty input on either side gives an empty output.
//!
//! # Operations
//!
//! - [`add`] - saturating 8-bit sum of all four channels
//! - [`multiply`] - normalized product, alpha included
//! - [`divide`] - normalized quotient with a fixed zero-divisor policy
//! - [`divide_checked`] - quotient that fails on the first zero divisor
//!
//! The `*_color` variants broadcast one tint over the whole buffer.
//! [`blend_buffers`] and [`divide_buffers_checked`] work on [`PixelBuffer`]s
//! and refuse differently sized inputs instead of truncating.
//!
//! # Example
//!
//! ```rust
//! use imgkit_core::{LinearColor, PixelBuffer, Rgba8};
//! use imgkit_ops::blend::{multiply, multiply_color};
//!
//! let a = [Rgba8::new(200, 100, 50, 255)];
//! assert_eq!(multiply(&a, &[Rgba8::WHITE]), a);
//!
//! let half = multiply_color(&a, LinearColor::new(0.5, 0.5, 0.5, 1.0));
//! assert_eq!(half[0].r, 100);
//! ```

use std::fmt;
use std::str::FromStr;

use imgkit_core::{LinearColor, PixelBuffer, Rgba8};
use tracing::{debug, trace};

use crate::{OpsError, OpsResult};

/// Blend operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendOp {
    /// Saturating sum.
    #[default]
    Add,
    /// Normalized product.
    Multiply,
    /// Normalized quotient.
    Divide,
}

impl BlendOp {
    /// Every operation.
    pub const ALL: [BlendOp; 3] = [BlendOp::Add, BlendOp::Multiply, BlendOp::Divide];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            BlendOp::Add => "add",
            BlendOp::Multiply => "multiply",
            BlendOp::Divide => "divide",
        }
    }
}

impl fmt::Display for BlendOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendOp {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" | "plus" => Ok(BlendOp::Add),
            "multiply" | "mul" => Ok(BlendOp::Multiply),
            "divide" | "div" => Ok(BlendOp::Divide),
            other => Err(OpsError::InvalidParameter(format!("unknown blend op '{other}'"))),
        }
    }
}

/// Saturating per-channel sum.
///
/// A pair where both alphas are exactly zero produces
/// [`Rgba8::TRANSPARENT`] instead of the sum.
#[inline]
pub fn add_pixel(a: Rgba8, b: Rgba8) -> Rgba8 {
    if a.a == 0 && b.a == 0 {
        return Rgba8::TRANSPARENT;
    }
    Rgba8::new(
        a.r.saturating_add(b.r),
        a.g.saturating_add(b.g),
        a.b.saturating_add(b.b),
        a.a.saturating_add(b.a),
    )
}

/// Normalized per-channel product.
#[inline]
pub fn multiply_pixel(a: Rgba8, b: Rgba8) -> Rgba8 {
    let (a, b) = (a.to_linear(), b.to_linear());
    Rgba8::from_linear(LinearColor::new(a.r * b.r, a.g * b.g, a.b * b.b, a.a * b.a).clamp01())
}

/// Normalized quotient of one channel.
///
/// `x / 0` is 1.0 for `x > 0` and 0.0 for `x == 0`.
#[inline]
fn divide_unit(x: f32, y: f32) -> f32 {
    if y == 0.0 {
        return if x > 0.0 { 1.0 } else { 0.0 };
    }
    (x / y).clamp(0.0, 1.0)
}

/// Normalized per-channel quotient.
#[inline]
pub fn divide_pixel(a: Rgba8, b: Rgba8) -> Rgba8 {
    let (a, b) = (a.to_linear(), b.to_linear());
    Rgba8::from_linear(LinearColor::new(
        divide_unit(a.r, b.r),
        divide_unit(a.g, b.g),
        divide_unit(a.b, b.b),
        divide_unit(a.a, b.a),
    ))
}

fn zip_with(a: &[Rgba8], b: &[Rgba8], f: impl Fn(Rgba8, Rgba8) -> Rgba8) -> Vec<Rgba8> {
    a.iter().zip(b).map(|(&pa, &pb)| f(pa, pb)).collect()
}

/// Saturating sum of two buffers.
pub fn add(a: &[Rgba8], b: &[Rgba8]) -> Vec<Rgba8> {
    trace!(len_a = a.len(), len_b = b.len(), "add");
    zip_with(a, b, add_pixel)
}

/// Normalized product of two buffers.
pub fn multiply(a: &[Rgba8], b: &[Rgba8]) -> Vec<Rgba8> {
    trace!(len_a = a.len(), len_b = b.len(), "multiply");
    zip_with(a, b, multiply_pixel)
}

/// Normalized quotient `a / b`.
///
/// Never produces NaN or infinity. Zero divisor channels saturate to 255
/// unless the dividend channel is also zero.
pub fn divide(a: &[Rgba8], b: &[Rgba8]) -> Vec<Rgba8> {
    trace!(len_a = a.len(), len_b = b.len(), "divide");
    let n = a.len().min(b.len());
    let zeros = b[..n]
        .iter()
        .filter(|p| p.r == 0 || p.g == 0 || p.b == 0 || p.a == 0)
        .count();
    if zeros > 0 {
        debug!(zeros, "divide: zero divisor channels saturated");
    }
    zip_with(a, b, divide_pixel)
}

/// Like [`divide`], but fails on the first zero divisor channel.
pub fn divide_checked(a: &[Rgba8], b: &[Rgba8]) -> OpsResult<Vec<Rgba8>> {
    for (index, p) in b.iter().take(a.len()).enumerate() {
        let zero = [('r', p.r), ('g', p.g), ('b', p.b), ('a', p.a)]
            .into_iter()
            .find(|&(_, v)| v == 0);
        if let Some((channel, _)) = zero {
            return Err(OpsError::DivisionByZero { index, channel });
        }
    }
    Ok(divide(a, b))
}

fn broadcast(len: usize, tint: LinearColor) -> Vec<Rgba8> {
    vec![Rgba8::from_linear(tint); len]
}

/// Add a constant tint to every pixel.
pub fn add_color(pixels: &[Rgba8], tint: LinearColor) -> Vec<Rgba8> {
    add(pixels, &broadcast(pixels.len(), tint))
}

/// Multiply every pixel by a constant tint.
pub fn multiply_color(pixels: &[Rgba8], tint: LinearColor) -> Vec<Rgba8> {
    multiply(pixels, &broadcast(pixels.len(), tint))
}

/// Divide every pixel by a constant tint.
pub fn divide_color(pixels: &[Rgba8], tint: LinearColor) -> Vec<Rgba8> {
    divide(pixels, &broadcast(pixels.len(), tint))
}

/// Dispatch a two-buffer blend.
pub fn blend(a: &[Rgba8], b: &[Rgba8], op: BlendOp) -> Vec<Rgba8> {
    match op {
        BlendOp::Add => add(a, b),
        BlendOp::Multiply => multiply(a, b),
        BlendOp::Divide => divide(a, b),
    }
}

/// Dispatch a buffer-and-tint blend.
pub fn blend_color(pixels: &[Rgba8], tint: LinearColor, op: BlendOp) -> Vec<Rgba8> {
    blend(pixels, &broadcast(pixels.len(), tint), op)
}

fn check_same_size(a: &PixelBuffer, b: &PixelBuffer) -> OpsResult<()> {
    if a.size() != b.size() {
        return Err(OpsError::SizeMismatch(format!(
            "{}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }
    Ok(())
}

/// [`blend`] over two buffers of equal size.
///
/// # Errors
///
/// [`OpsError::SizeMismatch`] when the dimensions differ.
pub fn blend_buffers(a: &PixelBuffer, b: &PixelBuffer, op: BlendOp) -> OpsResult<PixelBuffer> {
    check_same_size(a, b)?;
    Ok(a.with_pixels(blend(a.pixels(), b.pixels(), op))?)
}

/// [`divide_checked`] over two buffers of equal size.
pub fn divide_buffers_checked(a: &PixelBuffer, b: &PixelBuffer) -> OpsResult<PixelBuffer> {
    check_same_size(a, b)?;
    Ok(a.with_pixels(divide_checked(a.pixels(), b.pixels())?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Rgba8> {
        vec![
            Rgba8::new(10, 200, 0, 255),
            Rgba8::new(128, 64, 32, 100),
            Rgba8::new(255, 255, 255, 0),
            Rgba8::new(0, 0, 0, 0),
        ]
    }

    #[test]
    fn test_add_saturates() {
        let out = add(&[Rgba8::new(200, 100, 0, 200)], &[Rgba8::new(100, 100, 5, 100)]);
        assert_eq!(out, vec![Rgba8::new(255, 200, 5, 255)]);
    }

    #[test]
    fn test_add_both_transparent_is_zeroed() {
        let out = add(&[Rgba8::new(50, 60, 70, 0)], &[Rgba8::new(1, 2, 3, 0)]);
        assert_eq!(out, vec![Rgba8::TRANSPARENT]);
        // one transparent side still sums
        let out = add(&[Rgba8::new(50, 60, 70, 0)], &[Rgba8::new(1, 2, 3, 1)]);
        assert_eq!(out, vec![Rgba8::new(51, 62, 73, 1)]);
    }

    #[test]
    fn test_min_length_policy() {
        let a = sample();
        assert_eq!(add(&a, &a[..2]).len(), 2);
        assert_eq!(multiply(&a[..1], &a).len(), 1);
        assert!(divide(&a, &[]).is_empty());
        assert!(add(&[], &a).is_empty());
        assert!(add_color(&[], LinearColor::WHITE).is_empty());
    }

    #[test]
    fn test_multiply_alpha_is_computed() {
        let out = multiply(&[Rgba8::new(255, 255, 255, 128)], &[Rgba8::new(255, 0, 255, 128)]);
        assert_eq!(out[0], Rgba8::new(255, 0, 255, 64));
    }

    #[test]
    fn test_divide_zero_policy() {
        let a = [Rgba8::new(100, 0, 255, 255)];
        let b = [Rgba8::new(0, 0, 255, 255)];
        assert_eq!(divide(&a, &b), vec![Rgba8::new(255, 0, 255, 255)]);
    }

    #[test]
    fn test_divide_clamps_above_one() {
        let out = divide(&[Rgba8::opaque(200, 50, 20)], &[Rgba8::opaque(100, 100, 100)]);
        assert_eq!(out[0], Rgba8::opaque(255, 128, 51));
    }

    #[test]
    fn test_divide_checked_reports_channel() {
        let a = sample();
        let b = [Rgba8::WHITE, Rgba8::new(5, 5, 0, 5)];
        assert_eq!(
            divide_checked(&a, &b),
            Err(OpsError::DivisionByZero { index: 1, channel: 'b' })
        );
        let ok = divide_checked(&a[..1], &[Rgba8::WHITE]).unwrap();
        assert_eq!(ok, vec![a[0]]);
    }

    #[test]
    fn test_color_variants_broadcast() {
        let a = sample();
        assert_eq!(multiply_color(&a, LinearColor::WHITE), multiply(&a, &vec![Rgba8::WHITE; 4]));
        let tinted = add_color(&[Rgba8::opaque(10, 10, 10)], LinearColor::new(0.0, 0.5, 1.0, 0.0));
        assert_eq!(tinted[0], Rgba8::opaque(10, 138, 255));
        let divided = divide_color(&[Rgba8::opaque(64, 64, 64)], LinearColor::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(divided[0], Rgba8::opaque(128, 128, 128));
    }

    #[test]
    fn test_blend_dispatch() {
        let a = sample();
        let b: Vec<Rgba8> = a.iter().rev().copied().collect();
        for op in BlendOp::ALL {
            let direct = match op {
                BlendOp::Add => add(&a, &b),
                BlendOp::Multiply => multiply(&a, &b),
                BlendOp::Divide => divide(&a, &b),
            };
            assert_eq!(blend(&a, &b, op), direct);
            assert_eq!(op.to_string().parse::<BlendOp>().unwrap(), op);
        }
        assert!("screen".parse::<BlendOp>().is_err());
    }

    #[test]
    fn test_buffers_must_match() {
        let a = PixelBuffer::filled(3, 2, Rgba8::opaque(10, 20, 30)).unwrap();
        let b = PixelBuffer::filled(2, 3, Rgba8::WHITE).unwrap();
        let err = blend_buffers(&a, &b, BlendOp::Add).unwrap_err();
        assert!(matches!(err, OpsError::SizeMismatch(_)));
        assert!(err.to_string().contains("3x2 vs 2x3"));
        assert!(matches!(divide_buffers_checked(&a, &b), Err(OpsError::SizeMismatch(_))));

        let same = PixelBuffer::filled(3, 2, Rgba8::WHITE).unwrap();
        let out = blend_buffers(&a, &same, BlendOp::Multiply).unwrap();
        assert_eq!(out, a);
    }
}
