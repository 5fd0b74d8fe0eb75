//! Path-based helpers over the codec layer.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use imgkit_core::{ImageSize, PixelBuffer};
use tracing::debug;

use crate::codec::{self, Codec};
use crate::detect::{size_from_reader, ImageFormat};
use crate::{IoError, IoResult};

fn not_found(path: &Path) -> impl FnOnce(io::Error) -> IoError + '_ {
    move |e| match e.kind() {
        io::ErrorKind::NotFound => IoError::NotFound(path.to_path_buf()),
        _ => IoError::Io(e),
    }
}

fn open(path: &Path) -> IoResult<BufReader<File>> {
    Ok(BufReader::new(File::open(path).map_err(not_found(path))?))
}

/// Detects the format of a file from its leading bytes.
pub fn read_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    ImageFormat::from_reader(&mut open(path.as_ref())?)
}

/// Reads image dimensions from the header without decoding pixels.
pub fn read_size<P: AsRef<Path>>(path: P) -> IoResult<ImageSize> {
    size_from_reader(open(path.as_ref())?)
}

/// Loads and decodes an image file.
pub fn load<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(not_found(path))?;
    let (buffer, format) = codec::decode(&bytes)?;
    debug!(path = %path.display(), %format, width = buffer.width(), height = buffer.height(), "loaded");
    Ok(buffer)
}

/// Encodes `buffer` in the format named by the path's extension and writes it.
pub fn save<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_extension(path);
    if format == ImageFormat::Invalid {
        return Err(IoError::UnsupportedFormat(format!(
            "no image extension on {}",
            path.display()
        )));
    }
    save_as(path, buffer, format, &Codec::default())
}

/// Writes `buffer` as PNG regardless of extension.
pub fn save_png<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> IoResult<()> {
    save_as(path.as_ref(), buffer, ImageFormat::Png, &Codec::default())
}

/// Encoded PNG bytes for `buffer`.
pub fn png_bytes(buffer: &PixelBuffer) -> IoResult<Vec<u8>> {
    codec::encode(buffer, ImageFormat::Png)
}

fn save_as(path: &Path, buffer: &PixelBuffer, format: ImageFormat, codec: &Codec) -> IoResult<()> {
    use crate::codec::BitmapEncoder;

    let bytes = codec.encode(buffer, format)?;
    fs::write(path, &bytes)?;
    debug!(path = %path.display(), %format, bytes = bytes.len(), "saved");
    Ok(())
}
