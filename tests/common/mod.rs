//! Shared fixtures for the integration tests.
//!
//! GIFs are synthesized on the fly with the `image` GIF encoder, so no
//! binary fixtures are checked in.

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};

/// Delay of every synthesized frame, in milliseconds.
pub const FRAME_DELAY_MS: u32 = 100;

/// Write an animated GIF of `frame_count` frames of `width × height` to
/// `directory/name` and return its path.
///
/// Each frame has a distinct colour and a transparent top-left quadrant so
/// palette and alpha handling are both exercised.
pub fn write_gif(directory: &Path, name: &str, width: u32, height: u32, frame_count: u32) -> PathBuf {
    let path = directory.join(name);
    let file = File::create(&path).expect("Failed to create GIF fixture");

    let frames: Vec<Frame> = (0..frame_count)
        .map(|index| {
            let shade = (index * 40 % 256) as u8;
            let image = RgbaImage::from_fn(width, height, |x, y| {
                if x < width / 2 && y < height / 2 {
                    Rgba([0, 0, 0, 0])
                } else {
                    Rgba([shade, 255 - shade, 128, 255])
                }
            });
            Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1))
        })
        .collect();

    let mut encoder = GifEncoder::new(file);
    encoder
        .set_repeat(Repeat::Infinite)
        .expect("Failed to set GIF repeat");
    encoder
        .encode_frames(frames)
        .expect("Failed to encode GIF fixture");

    path
}

/// Sorted file names inside `directory`.
pub fn file_names(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(directory)
        .expect("Failed to read directory")
        .map(|entry| {
            entry
                .expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
