//! Brightness, contrast and hue/saturation/luminance adjustments.
//!
//! Brightness and contrast take a parameter in the nominal domain [0, 2]
//! where 1.0 is neutral. The parameter is mapped linearly onto an offset in
//! [-255, 255]:
//!
//! ```text
//! offset = clamp((p - 1) * 255, -255, 255)
//! ```
//!
//! Values outside [0, 2] are accepted and clamped by that mapping.
//!
//! Every function borrows its input and returns a new pixel vector. Alpha is
//! never touched.
//!
//! # Example
//!
//! ```rust
//! use imgkit_core::Rgba8;
//! use imgkit_ops::tone::set_brightness;
//!
//! let src = [Rgba8::new(255, 0, 0, 255), Rgba8::WHITE];
//! let out = set_brightness(&src, 1.5);
//! assert_eq!(out[0], Rgba8::new(255, 127, 127, 255));
//! assert_eq!(out[1], Rgba8::WHITE);
//! ```

use imgkit_core::{clamp, Rgba8};
use tracing::trace;

/// Offset at brightness/contrast extremes.
const TONE_RANGE: f32 = 255.0;

/// Map a [0, 2] tone parameter onto an offset in [-255, 255].
#[inline]
pub fn map_tone_parameter(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    clamp((value - 1.0) * TONE_RANGE, -TONE_RANGE, TONE_RANGE)
}

/// Clamp to [0, 255] and truncate.
#[inline]
fn to_channel(v: f32) -> u8 {
    clamp(v, 0.0, 255.0) as u8
}

/// Add a constant offset to R, G and B.
pub fn set_brightness(pixels: &[Rgba8], brightness: f32) -> Vec<Rgba8> {
    let offset = map_tone_parameter(brightness);
    trace!(len = pixels.len(), brightness, offset, "set_brightness");

    pixels
        .iter()
        .map(|p| {
            Rgba8::new(
                to_channel(p.r as f32 + offset),
                to_channel(p.g as f32 + offset),
                to_channel(p.b as f32 + offset),
                p.a,
            )
        })
        .collect()
}

/// Contrast factor for a mapped offset.
///
/// The offset never reaches 259 because [`map_tone_parameter`] caps it at 255.
#[inline]
pub fn contrast_factor(offset: f32) -> f32 {
    (259.0 * (offset + 255.0)) / (255.0 * (259.0 - offset))
}

/// Stretch R, G and B around mid-grey 128.
pub fn set_contrast(pixels: &[Rgba8], contrast: f32) -> Vec<Rgba8> {
    let offset = map_tone_parameter(contrast);
    let factor = contrast_factor(offset);
    trace!(len = pixels.len(), contrast, factor, "set_contrast");

    let stretch = |c: u8| to_channel(factor * (c as f32 - 128.0) + 128.0);
    pixels
        .iter()
        .map(|p| Rgba8::new(stretch(p.r), stretch(p.g), stretch(p.b), p.a))
        .collect()
}

/// Rotate hue and scale saturation and value.
///
/// - `hue` is clamped to [0, 360] and added to each pixel's hue, wrapping
///   back into range.
/// - `saturation` and `luminance` multiply S and V, results clamped to [0, 1].
///
/// `(0, 1, 1)` is an identity up to HSV rounding (at most 1 per channel).
pub fn set_hue_saturation_luminance(
    pixels: &[Rgba8],
    hue: f32,
    saturation: f32,
    luminance: f32,
) -> Vec<Rgba8> {
    let hue = clamp(hue, 0.0, 360.0);
    trace!(len = pixels.len(), hue, saturation, luminance, "set_hue_saturation_luminance");

    pixels
        .iter()
        .map(|p| {
            let [h, s, v] = p.to_hsv();
            let shifted = h + hue;
            let h = if shifted >= 360.0 {
                clamp(shifted - 360.0, 0.0, 360.0)
            } else if shifted <= 0.0 {
                clamp(shifted + 360.0, 0.0, 360.0)
            } else {
                shifted
            };
            let s = clamp(s * saturation, 0.0, 1.0);
            let v = clamp(v * luminance, 0.0, 1.0);
            Rgba8::from_hsv([h, s, v], p.a)
        })
        .collect()
}

/// A bundle of tone parameters applied in one call.
///
/// Order is brightness, then contrast, then HSL. Neutral stages are skipped,
/// so the default value is an exact identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneAdjustment {
    /// Brightness in [0, 2], neutral 1.
    pub brightness: f32,
    /// Contrast in [0, 2], neutral 1.
    pub contrast: f32,
    /// Hue rotation in degrees [0, 360], neutral 0.
    pub hue: f32,
    /// Saturation multiplier, neutral 1.
    pub saturation: f32,
    /// Value multiplier, neutral 1.
    pub luminance: f32,
}

impl Default for ToneAdjustment {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            hue: 0.0,
            saturation: 1.0,
            luminance: 1.0,
        }
    }
}

impl ToneAdjustment {
    /// True when every stage is neutral.
    pub fn is_identity(&self) -> bool {
        map_tone_parameter(self.brightness) == 0.0
            && map_tone_parameter(self.contrast) == 0.0
            && !self.has_hsl()
    }

    fn has_hsl(&self) -> bool {
        clamp(self.hue, 0.0, 360.0) != 0.0 || self.saturation != 1.0 || self.luminance != 1.0
    }

    /// Run the non-neutral stages over `pixels`.
    pub fn apply(&self, pixels: &[Rgba8]) -> Vec<Rgba8> {
        let mut out = pixels.to_vec();
        if map_tone_parameter(self.brightness) != 0.0 {
            out = set_brightness(&out, self.brightness);
        }
        if map_tone_parameter(self.contrast) != 0.0 {
            out = set_contrast(&out, self.contrast);
        }
        if self.has_hsl() {
            out = set_hue_saturation_luminance(&out, self.hue, self.saturation, self.luminance);
        }
        out
    }
}
