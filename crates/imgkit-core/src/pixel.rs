//! Pixel types.
//!
//! - [`Rgba8`] - four 8-bit channels, the storage format of every buffer
//! - [`LinearColor`] - normalized `f32` channels in [0.0, 1.0] used for
//!   blend and HSV math that needs fractional precision
//!
//! Conversion from float back to 8-bit clamps to [0, 1] and rounds to
//! nearest. Alpha is always carried through; nothing here forces it opaque.
//!
//! # Memory Layout
//!
//! [`Rgba8`] is `#[repr(C)]` so a `&[Rgba8]` has the same layout as a packed
//! `R G B A R G B A ...` byte stream.

use std::fmt;

/// 8-bit RGBA pixel.
///
/// # Example
///
/// ```
/// use imgkit_core::Rgba8;
///
/// let px = Rgba8::opaque(255, 128, 0);
/// assert_eq!(px.a, 255);
/// assert_eq!(px.to_array(), [255, 128, 0, 255]);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new pixel.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque pixel (alpha = 255).
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from `[r, g, b, a]`.
    #[inline]
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Normalize every channel to [0, 1].
    #[inline]
    pub fn to_linear(self) -> LinearColor {
        LinearColor::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }

    /// Quantize a float color, clamping and rounding each channel.
    ///
    /// ```
    /// use imgkit_core::{LinearColor, Rgba8};
    ///
    /// let px = Rgba8::from_linear(LinearColor::new(1.5, 0.5, -1.0, 0.0));
    /// assert_eq!(px, Rgba8::new(255, 128, 0, 0));
    /// ```
    #[inline]
    pub fn from_linear(c: LinearColor) -> Self {
        Self::new(
            unit_to_u8(c.r),
            unit_to_u8(c.g),
            unit_to_u8(c.b),
            unit_to_u8(c.a),
        )
    }
}

impl fmt::Debug for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgba8({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Rgba8 {
    #[inline]
    fn from(c: [u8; 4]) -> Self {
        Self::from_array(c)
    }
}

impl From<Rgba8> for [u8; 4] {
    #[inline]
    fn from(p: Rgba8) -> Self {
        p.to_array()
    }
}

/// Normalized float color, channels nominally in [0.0, 1.0].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LinearColor {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl LinearColor {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new color.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from `[r, g, b, a]`.
    #[inline]
    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Clamp every channel to [0, 1].
    #[inline]
    pub fn clamp01(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }
}

impl From<Rgba8> for LinearColor {
    #[inline]
    fn from(p: Rgba8) -> Self {
        p.to_linear()
    }
}

/// [0, 1] float to 8-bit, clamped and rounded. NaN maps to 0.
#[inline]
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_roundtrip_exact() {
        for v in 0..=255u8 {
            let px = Rgba8::new(v, 255 - v, v / 2, v);
            assert_eq!(Rgba8::from_linear(px.to_linear()), px);
        }
    }

    #[test]
    fn test_from_linear_clamps() {
        let px = Rgba8::from_linear(LinearColor::new(2.0, -0.5, 0.5, 1.0));
        assert_eq!(px, Rgba8::new(255, 0, 128, 255));
    }

    #[test]
    fn test_from_linear_nan_is_zero() {
        let px = Rgba8::from_linear(LinearColor::new(f32::NAN, 1.0, 1.0, 1.0));
        assert_eq!(px.r, 0);
    }

    #[test]
    fn test_array_conversions() {
        let px: Rgba8 = [1, 2, 3, 4].into();
        let arr: [u8; 4] = px.into();
        assert_eq!(arr, [1, 2, 3, 4]);
        assert_eq!(px.with_alpha(9).a, 9);
    }

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<Rgba8>(), 4);
        assert_eq!(std::mem::align_of::<Rgba8>(), 1);
    }
}
