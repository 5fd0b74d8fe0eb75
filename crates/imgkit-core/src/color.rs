//! Scalar color math: clamping, HSV conversion, greyscale, channel isolation.
//!
//! All functions are pure and allocation free.
//!
//! # HSV convention
//!
//! Hue is in degrees [0, 360), saturation and value in [0, 1]. RGB inputs
//! and outputs are normalized floats. Round trips are visually lossless but
//! not bit exact, so compare with a tolerance.
//!
//! ```
//! use imgkit_core::color::{hsv_to_rgb, rgb_to_hsv};
//!
//! let hsv = rgb_to_hsv([1.0, 0.0, 0.0]);
//! assert_eq!(hsv, [0.0, 1.0, 1.0]);
//! let rgb = hsv_to_rgb([120.0, 1.0, 1.0]);
//! assert_eq!(rgb, [0.0, 1.0, 0.0]);
//! ```

use crate::pixel::unit_to_u8;
use crate::{ChannelMode, Rgba8};

/// Luminance weight for red.
pub const LUMA_R: f32 = 0.2989;
/// Luminance weight for green.
pub const LUMA_G: f32 = 0.5870;
/// Luminance weight for blue.
pub const LUMA_B: f32 = 0.1140;

/// Standard clamp over any partially ordered value.
///
/// Returns `low` for incomparable inputs (NaN).
#[inline]
pub fn clamp<T: PartialOrd>(value: T, low: T, high: T) -> T {
    if value > high {
        high
    } else if value >= low {
        value
    } else {
        low
    }
}

/// Normalized RGB to HSV (H in degrees).
#[inline]
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max <= f32::EPSILON { 0.0 } else { delta / max };

    [h, s, max]
}

/// HSV (H in degrees) to normalized RGB.
///
/// Hue outside [0, 360) wraps, so 360 is the same as 0.
#[inline]
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let h = hsv[0].rem_euclid(360.0);
    let s = hsv[1];
    let v = hsv[2];

    let c = v * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());

    let (r1, g1, b1) = if h_prime < 1.0 {
        (c, x, 0.0)
    } else if h_prime < 2.0 {
        (x, c, 0.0)
    } else if h_prime < 3.0 {
        (0.0, c, x)
    } else if h_prime < 4.0 {
        (0.0, x, c)
    } else if h_prime < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let m = v - c;
    [r1 + m, g1 + m, b1 + m]
}

impl Rgba8 {
    /// HSV of the color channels.
    #[inline]
    pub fn to_hsv(self) -> [f32; 3] {
        let c = self.to_linear();
        rgb_to_hsv([c.r, c.g, c.b])
    }

    /// Build from HSV plus an explicit alpha, clamped and rounded.
    #[inline]
    pub fn from_hsv(hsv: [f32; 3], alpha: u8) -> Self {
        let [r, g, b] = hsv_to_rgb(hsv);
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), alpha)
    }
}

/// Weighted luminance on the 8-bit scale, unrounded.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    r * LUMA_R + g * LUMA_G + b * LUMA_B
}

/// Broadcast luminance into R, G and B; alpha forced opaque.
///
/// ```
/// use imgkit_core::{to_greyscale, Rgba8};
///
/// assert_eq!(to_greyscale(Rgba8::new(255, 255, 255, 0)), Rgba8::WHITE);
/// ```
#[inline]
pub fn to_greyscale(pixel: Rgba8) -> Rgba8 {
    let lum = luminance(pixel.r as f32, pixel.g as f32, pixel.b as f32);
    let v = clamp(lum.round(), 0.0, 255.0) as u8;
    Rgba8::new(v, v, v, 255)
}

/// Project a pixel onto a [`ChannelMode`].
///
/// | Mode      | R   | G   | B   | A           |
/// |-----------|-----|-----|-----|-------------|
/// | Rgb       | R   | G   | B   | 255         |
/// | Rgba      | R   | G   | B   | passthrough |
/// | R         | R   | 0   | 0   | 255         |
/// | G         | 0   | G   | 0   | 255         |
/// | B         | 0   | 0   | B   | 255         |
/// | A         | A   | A   | A   | 0           |
/// | Greyscale | lum | lum | lum | 255         |
#[inline]
pub fn isolate_channel(pixel: Rgba8, mode: ChannelMode) -> Rgba8 {
    let Rgba8 { r, g, b, a } = pixel;
    match mode {
        ChannelMode::Rgb => Rgba8::new(r, g, b, 255),
        ChannelMode::Rgba => pixel,
        ChannelMode::R => Rgba8::new(r, 0, 0, 255),
        ChannelMode::G => Rgba8::new(0, g, 0, 255),
        ChannelMode::B => Rgba8::new(0, 0, b, 255),
        ChannelMode::A => Rgba8::new(a, a, a, 0),
        ChannelMode::Greyscale => to_greyscale(pixel),
    }
}

/// Project a widened (unclamped) RGB accumulator plus alpha.
///
/// Each channel is clamped to [0, 255] and rounded before
/// [`isolate_channel`] runs.
#[inline]
pub fn isolate_accumulated(rgb: [f32; 3], alpha: u8, mode: ChannelMode) -> Rgba8 {
    let q = |v: f32| -> u8 {
        if v.is_nan() {
            0
        } else {
            clamp(v, 0.0, 255.0).round() as u8
        }
    };
    isolate_channel(Rgba8::new(q(rgb[0]), q(rgb[1]), q(rgb[2]), alpha), mode)
}
