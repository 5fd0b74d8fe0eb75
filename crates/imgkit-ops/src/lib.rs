//! # imgkit-ops
//!
//! Pure transforms over 8-bit RGBA pixel buffers.
//!
//! Every operation borrows its input and returns freshly allocated pixels.
//! Nothing here touches the filesystem or keeps global state.
//!
//! # Modules
//!
//! - [`tone`] - brightness, contrast, hue/saturation/luminance
//! - [`blend`] - add, multiply and divide between buffers or with a tint
//! - [`kernels`] - [`BitmapFilter`] and the named kernel catalog
//! - [`filter`] - kernel convolution
//! - [`resize`] - resampling
//! - [`parallel`] - row-parallel convolution (feature `parallel`)
//! - [`task`] - off-thread filtering with a completion callback (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use imgkit_core::{PixelBuffer, Rgba8};
//! use imgkit_ops::{apply_filter_buffer, get_bitmap_filter, tone, BitmapFilterType};
//!
//! let buf = PixelBuffer::filled(4, 4, Rgba8::opaque(100, 150, 200)).unwrap();
//! let brighter = buf.with_pixels(tone::set_brightness(buf.pixels(), 1.2)).unwrap();
//! let sharp = apply_filter_buffer(&brighter, &get_bitmap_filter(BitmapFilterType::Sharpen, None)).unwrap();
//! assert_eq!(sharp.size(), buf.size());
//! ```
//!
//! ## Composing
//!
//! ```rust,ignore
//! let out = blend::multiply(&tone::set_contrast(&pixels, 1.3), &mask);
//! let edges = filter::apply_filter(&out, w, h, &get_bitmap_filter(BitmapFilterType::EdgeDetection, None))?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blend;
pub mod filter;
pub mod kernels;
pub mod resize;
pub mod tone;

#[cfg(feature = "parallel")]
pub mod parallel;
#[cfg(feature = "parallel")]
pub mod task;

pub use blend::BlendOp;
pub use error::{OpsError, OpsResult};
pub use filter::{apply_filter, apply_filter_buffer};
pub use kernels::{get_bitmap_filter, BitmapFilter, BitmapFilterType, EdgeMode};
pub use resize::{resize_bitmap, ResizeFilter};
pub use tone::ToneAdjustment;
