//! # imgkit-core
//!
//! Core types for 8-bit raster image processing.
//!
//! This crate provides the foundational types used throughout imgkit:
//!
//! - [`Rgba8`], [`LinearColor`] - 8-bit and normalized float pixels
//! - [`PixelBuffer`] - width x height plus row-major RGBA pixels
//! - [`ChannelMode`] - channel selection for filters
//! - [`color`] - clamping, HSV conversion, greyscale and channel isolation
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. Everything else builds on it:
//!
//! ```text
//! imgkit-core (this crate)
//!    ^
//!    |
//!    +-- imgkit-ops (tone, blend, convolution, kernels)
//!    +-- imgkit-io (codec glue, format detection)
//!    +-- imgkit-cli
//! ```
//!
//! ## Ownership
//!
//! Buffers are plain values. Transforms borrow their inputs and hand back
//! freshly allocated pixels; nothing is mutated behind the caller's back.
//!
//! ```rust
//! use imgkit_core::{PixelBuffer, Rgba8};
//!
//! let buf = PixelBuffer::filled(2, 2, Rgba8::opaque(10, 20, 30)).unwrap();
//! assert_eq!(buf.len(), 4);
//! assert_eq!(buf.pixel(1, 1), Some(Rgba8::opaque(10, 20, 30)));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod channel;
pub mod color;
pub mod error;
pub mod pixel;

pub use buffer::{ImageSize, PixelBuffer};
pub use channel::ChannelMode;
pub use color::{clamp, hsv_to_rgb, isolate_accumulated, isolate_channel, luminance, rgb_to_hsv, to_greyscale};
pub use error::{Error, Result};
pub use pixel::{LinearColor, Rgba8};

/// Prelude module for convenient imports.
///
/// ```
/// use imgkit_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{ImageSize, PixelBuffer};
    pub use crate::channel::ChannelMode;
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{LinearColor, Rgba8};
}
