//! # imgkit-io
//!
//! Codec glue between encoded image bytes and [`PixelBuffer`].
//!
//! Formats are detected from magic bytes, never trusted from extensions
//! when reading. Decoding always yields 8-bit RGBA; opaque sources get
//! alpha 255.
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | yes  | yes   | `png`   |
//! | JPEG   | yes  | yes   | `jpeg`  |
//! | BMP    | yes  | yes   | `bmp`   |
//! | ICO    | yes  | no    | `bmp`   |
//! | EXR    | detect only | no | |
//! | ICNS   | detect only | no | |
//!
//! # Example
//!
//! ```rust,ignore
//! use imgkit_io::{load, save};
//!
//! let buf = load("input.png")?;
//! save("output.jpg", &buf)?;
//! ```
//!
//! [`PixelBuffer`]: imgkit_core::PixelBuffer

#![warn(missing_docs)]

mod error;
pub mod codec;
pub mod detect;
pub mod file;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "bmp")]
pub mod bmp;

pub use codec::{decode, encode, BitmapDecoder, BitmapEncoder, Codec, FilePresenter, Presenter};
pub use detect::{size_from_reader, probe_size, ImageFormat};
pub use error::{IoError, IoResult};
pub use file::{load, png_bytes, read_format, read_size, save, save_png};
