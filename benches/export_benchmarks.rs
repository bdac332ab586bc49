//! Benchmarks for frame export and descriptor writing.
//!
//! Run with: cargo bench
//!
//! The source GIF is synthesized into a temporary directory at startup.

use std::fs::File;
use std::path::{Path, PathBuf};

use criterion::{Criterion, criterion_group, criterion_main};
use gifpack::{ExportOptions, ResizeFilter};
use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgba, RgbaImage};

fn sample_gif(directory: &Path) -> PathBuf {
    let path = directory.join("sample.gif");
    let file = File::create(&path).unwrap();
    let frames = (0..16u32).map(|index| {
        let image = RgbaImage::from_fn(128, 96, |x, y| {
            Rgba([(x * 2) as u8, (y * 2) as u8, (index * 16) as u8, 255])
        });
        Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(50, 1))
    });
    GifEncoder::new(file).encode_frames(frames).unwrap();
    path
}

fn benchmark_frame_export(criterion: &mut Criterion) {
    let directory = tempfile::tempdir().unwrap();
    let gif = sample_gif(directory.path());

    criterion.bench_function("export 16 frames (lanczos3, derived width)", |bencher| {
        bencher.iter(|| {
            gifpack::export_frames(&gif, directory.path().join("lanczos"), "f", 48, None).unwrap()
        });
    });

    let nearest = ExportOptions::new(48).with_filter(ResizeFilter::Nearest);
    criterion.bench_function("export 16 frames (nearest, derived width)", |bencher| {
        bencher.iter(|| {
            gifpack::export_frames_with_options(&gif, directory.path().join("nearest"), "f", &nearest)
                .unwrap()
        });
    });
}

fn benchmark_config_write(criterion: &mut Criterion) {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("config.json");

    criterion.bench_function("write config.json", |bencher| {
        bencher.iter(|| gifpack::write_config(&path, "capoo1", "Capoo", "capoo-", None, 64, 12).unwrap());
    });
}

criterion_group!(benches, benchmark_frame_export, benchmark_config_write);
criterion_main!(benches);
