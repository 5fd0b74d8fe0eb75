//! Benchmarks for imgkit operations.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use imgkit_core::{ImageSize, LinearColor, PixelBuffer, Rgba8};
use imgkit_ops::blend;
use imgkit_ops::resize::{resize_bitmap, ResizeFilter};
use imgkit_ops::tone::{set_brightness, set_contrast, set_hue_saturation_luminance};
use imgkit_ops::{apply_filter, get_bitmap_filter, BitmapFilterType};

fn test_pixels(w: u32, h: u32) -> Vec<Rgba8> {
    (0..w * h)
        .map(|i| Rgba8::new((i % 251) as u8, (i % 241) as u8, (i % 239) as u8, 255))
        .collect()
}

/// Benchmark kernel convolution, sequential vs row-parallel.
fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolution");

    for size in [64u32, 256, 1024] {
        let pixels = test_pixels(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));

        for kind in [BitmapFilterType::Gaussian2, BitmapFilterType::EdgeDetection] {
            let filter = get_bitmap_filter(kind, None);
            group.bench_with_input(BenchmarkId::new(format!("{kind}"), size), &pixels, |b, p| {
                b.iter(|| apply_filter(black_box(p), size, size, &filter))
            });
            group.bench_with_input(BenchmarkId::new(format!("{kind}_par"), size), &pixels, |b, p| {
                b.iter(|| imgkit_ops::parallel::apply_filter(black_box(p), size, size, &filter))
            });
        }
    }

    group.finish();
}

/// Benchmark per-pixel tone curves.
fn bench_tone(c: &mut Criterion) {
    let mut group = c.benchmark_group("tone");
    let pixels = test_pixels(512, 512);
    group.throughput(Throughput::Elements(pixels.len() as u64));

    group.bench_function("brightness", |b| b.iter(|| set_brightness(black_box(&pixels), 1.3)));
    group.bench_function("contrast", |b| b.iter(|| set_contrast(black_box(&pixels), 0.7)));
    group.bench_function("hsl", |b| {
        b.iter(|| set_hue_saturation_luminance(black_box(&pixels), 90.0, 0.8, 1.1))
    });

    group.finish();
}

/// Benchmark blend arithmetic.
fn bench_blend(c: &mut Criterion) {
    let mut group = c.benchmark_group("blend");
    let a = test_pixels(512, 512);
    let b_pixels: Vec<Rgba8> = a.iter().rev().copied().collect();
    group.throughput(Throughput::Elements(a.len() as u64));

    group.bench_function("add", |b| b.iter(|| blend::add(black_box(&a), &b_pixels)));
    group.bench_function("multiply", |b| b.iter(|| blend::multiply(black_box(&a), &b_pixels)));
    group.bench_function("divide", |b| b.iter(|| blend::divide(black_box(&a), &b_pixels)));
    group.bench_function("multiply_color", |b| {
        b.iter(|| blend::multiply_color(black_box(&a), LinearColor::new(0.5, 0.75, 1.0, 1.0)))
    });

    group.finish();
}

/// Benchmark resampling and PNG encoding.
fn bench_resize_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");
    let pixels = test_pixels(512, 512);
    let from = ImageSize::new(512, 512);

    for filter in [ResizeFilter::Nearest, ResizeFilter::Bilinear, ResizeFilter::Box] {
        group.bench_with_input(BenchmarkId::new("half", filter), &pixels, |b, p| {
            b.iter(|| resize_bitmap(black_box(p), from, ImageSize::new(256, 256), filter))
        });
    }
    group.finish();

    let buf = PixelBuffer::new(512, 512, pixels).unwrap();
    c.bench_function("png_encode_512", |b| b.iter(|| imgkit_io::png_bytes(black_box(&buf))));
}

criterion_group!(benches, bench_convolution, bench_tone, bench_blend, bench_resize_encode);

criterion_main!(benches);
