//! Pixel buffer container.
//!
//! [`PixelBuffer`] is the canonical image value: dimensions plus row-major
//! RGBA pixels, top to bottom.
//!
//! ```text
//! pixels: [p(0,0) p(1,0) ... p(w-1,0)]   <- row 0
//!         [p(0,1) p(1,1) ... p(w-1,1)]   <- row 1
//!         ...
//! ```
//!
//! The invariant `pixels.len() == width * height` holds for every value that
//! can be constructed through the public API. Inputs that violate it are
//! rejected up front.

use crate::{Error, Result, Rgba8};

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width * height`, or an error if it does not fit in `usize`.
    pub fn pixel_count(self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| Error::invalid_dimensions(self.width, self.height, "pixel count overflows"))
    }

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for ImageSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// Owned 8-bit RGBA image.
///
/// # Example
///
/// ```rust
/// use imgkit_core::{PixelBuffer, Rgba8};
///
/// let buf = PixelBuffer::new(2, 1, vec![Rgba8::BLACK, Rgba8::WHITE]).unwrap();
/// assert_eq!(buf.pixel(1, 0), Some(Rgba8::WHITE));
/// assert_eq!(buf.pixel(2, 0), None);
///
/// // Wrong length is rejected, never padded.
/// assert!(PixelBuffer::new(2, 2, vec![Rgba8::BLACK]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl PixelBuffer {
    /// Wrap existing pixels, validating the length.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba8>) -> Result<Self> {
        let expected = ImageSize::new(width, height).pixel_count()?;
        if pixels.len() != expected {
            return Err(Error::shape_mismatch(expected, pixels.len()));
        }
        Ok(Self { width, height, pixels })
    }

    /// Buffer where every pixel is `color`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] when `width * height` overflows `usize`.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Result<Self> {
        let count = ImageSize::new(width, height).pixel_count()?;
        Ok(Self {
            width,
            height,
            pixels: vec![color; count],
        })
    }

    /// Build from packed `R G B A` bytes.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("{} bytes is not a whole number of RGBA pixels", bytes.len()),
            ));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Packed `R G B A` bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions.
    #[inline]
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True when the buffer has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major pixels.
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Consume the buffer, returning its pixels.
    #[inline]
    pub fn into_pixels(self) -> Vec<Rgba8> {
        self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// New buffer of the same size with `f` applied to every pixel.
    pub fn map_pixels<F>(&self, f: F) -> Self
    where
        F: FnMut(Rgba8) -> Rgba8,
    {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(f).collect(),
        }
    }

    /// Replace the pixels with a transform result of the same length.
    ///
    /// Used by pipeline stages that work on slices and hand back a `Vec`.
    pub fn with_pixels(&self, pixels: Vec<Rgba8>) -> Result<Self> {
        Self::new(self.width, self.height, pixels)
    }

    /// Copy with every alpha forced to 255.
    ///
    /// Captured framebuffers often carry garbage alpha; this is the
    /// normalisation applied before presenting them.
    pub fn make_opaque(&self) -> Self {
        self.map_pixels(|p| p.with_alpha(255))
    }
}
