//! File-level round trips through a temporary directory.

use imgkit_core::{ImageSize, PixelBuffer, Rgba8};
use imgkit_io::{load, png_bytes, read_format, read_size, save, save_png, FilePresenter, ImageFormat, IoError, Presenter};
use tempfile::TempDir;

fn gradient(w: u32, h: u32) -> PixelBuffer {
    let pixels = (0..w * h)
        .map(|i| {
            let (x, y) = (i % w, i / w);
            Rgba8::new((x * 255 / w) as u8, (y * 255 / h) as u8, 77, (128 + x) as u8)
        })
        .collect();
    PixelBuffer::new(w, h, pixels).unwrap()
}

#[test]
fn png_file_roundtrip_is_lossless() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("g.png");
    let buf = gradient(13, 7);

    save(&path, &buf).unwrap();
    assert_eq!(read_format(&path).unwrap(), ImageFormat::Png);
    assert_eq!(read_size(&path).unwrap(), ImageSize::new(13, 7));
    assert_eq!(load(&path).unwrap(), buf);
}

#[test]
fn save_png_ignores_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("actually_png.jpg");
    let buf = gradient(4, 4);

    save_png(&path, &buf).unwrap();
    assert_eq!(read_format(&path).unwrap(), ImageFormat::Png);
    assert_eq!(std::fs::read(&path).unwrap(), png_bytes(&buf).unwrap());
}

#[test]
fn jpeg_file_drops_alpha() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("g.jpg");
    save(&path, &gradient(32, 16)).unwrap();

    assert_eq!(read_format(&path).unwrap(), ImageFormat::Jpeg);
    assert_eq!(read_size(&path).unwrap(), ImageSize::new(32, 16));
    let back = load(&path).unwrap();
    assert!(back.pixels().iter().all(|p| p.a == 255));
}

#[test]
fn bmp_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("g.bmp");
    let buf = gradient(5, 3).make_opaque();

    save(&path, &buf).unwrap();
    assert_eq!(read_size(&path).unwrap(), ImageSize::new(5, 3));
    assert_eq!(load(&path).unwrap(), buf);
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.png");
    assert!(matches!(load(&path), Err(IoError::NotFound(p)) if p == path));
    assert!(matches!(read_size(&path), Err(IoError::NotFound(_))));
}

#[test]
fn corrupt_file_is_an_error_not_a_placeholder() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    let mut bytes = png_bytes(&gradient(8, 8)).unwrap();
    bytes.truncate(40);
    std::fs::write(&path, bytes).unwrap();
    assert!(matches!(load(&path), Err(IoError::DecodeError(_))));
}

#[test]
fn unknown_extension_refused() {
    let dir = TempDir::new().unwrap();
    let err = save(dir.path().join("out.xyz"), &gradient(2, 2)).unwrap_err();
    assert!(matches!(err, IoError::UnsupportedFormat(_)));
}

#[test]
fn file_presenter_writes_frames() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frame.png");
    let mut presenter = FilePresenter::new(&path).unwrap();
    assert_eq!(presenter.format(), ImageFormat::Png);

    let buf = gradient(6, 6);
    presenter.present(&buf).unwrap();
    assert_eq!(load(&path).unwrap(), buf);
}
