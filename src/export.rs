//! Frame export.
//!
//! Splits a GIF into one PNG per frame. Every frame is normalized to RGBA8,
//! resized to the target [`FrameSize`](crate::FrameSize), and saved as
//! `{pattern}{index}.png` in the destination directory.
//!
//! # Example
//!
//! ```no_run
//! use gifpack::GifPackError;
//!
//! // Height 64, width derived from each frame's aspect ratio.
//! let count = gifpack::export_frames("capoo.gif", "capoo/frames", "capoo-", 64, None)?;
//! println!("wrote {count} frames");
//! # Ok::<(), GifPackError>(())
//! ```

use std::fs;
use std::path::Path;

use image::{ImageFormat, Limits, imageops};

use crate::configuration::{ExportOptions, FrameSize};
use crate::descriptor::frame_file_name;
use crate::error::GifPackError;
use crate::progress::{OperationType, ProgressTracker};
use crate::source::GifSource;

/// Export every frame of `source` as a PNG into `destination`.
///
/// The output height is always `target_height`. With `target_width` set
/// every frame is exactly `target_width × target_height`; otherwise each
/// frame keeps its own aspect ratio.
///
/// Returns the number of frames written.
///
/// # Errors
///
/// See [`export_frames_with_options`].
pub fn export_frames<S: AsRef<Path>, D: AsRef<Path>>(
    source: S,
    destination: D,
    file_pattern: &str,
    target_height: u32,
    target_width: Option<u32>,
) -> Result<u64, GifPackError> {
    let options = ExportOptions::new(target_height).with_width(target_width);
    export_frames_with_options(source, destination, file_pattern, &options)
}

/// Export every frame of `source` using the given [`ExportOptions`].
///
/// `destination` and any missing parents are created first; an existing
/// directory is reused. Frames already written stay on disk if a later
/// frame fails.
///
/// # Errors
///
/// - [`GifPackError::NonPositiveDimension`] if the target height or a fixed
///   width is zero.
/// - [`GifPackError::FrameTooLarge`] if resizing a frame to the target size
///   would allocate more than [`Limits::default`] allows.
/// - [`GifPackError::IoError`] if `destination` cannot be created, e.g.
///   because it or one of its parents is a regular file.
/// - [`GifPackError::FileOpen`] / [`GifPackError::ImageError`] if the source
///   cannot be opened or decoded, or a frame cannot be encoded.
pub fn export_frames_with_options<S: AsRef<Path>, D: AsRef<Path>>(
    source: S,
    destination: D,
    file_pattern: &str,
    options: &ExportOptions,
) -> Result<u64, GifPackError> {
    let destination = destination.as_ref();
    check_frame_size(&options.frame_size)?;

    fs::create_dir_all(destination)?;

    let source = GifSource::open(source)?;
    let filter = options.filter.to_filter_type();
    let max_alloc = Limits::default().max_alloc.unwrap_or(u64::MAX);

    log::debug!(
        "Exporting frames of {} to {} (pattern={file_pattern:?}, size={:?}, filter={:?})",
        source.path().display(),
        destination.display(),
        options.frame_size,
        options.filter,
    );

    let mut tracker = ProgressTracker::new(
        options.progress.clone(),
        OperationType::FrameExport,
        None,
        options.batch_size,
    );

    for frame in source.frames() {
        let frame = frame?;
        let (width, height) = options
            .frame_size
            .resolve(frame.image.width(), frame.image.height());
        check_allocation(frame.image.width(), width, height, max_alloc)?;

        let resized = imageops::resize(&frame.image, width, height, filter);
        let output_path = destination.join(frame_file_name(file_pattern, frame.index));
        resized.save_with_format(&output_path, ImageFormat::Png)?;

        log::debug!(
            "Saved frame {} ({}x{} -> {width}x{height}) to {}",
            frame.index,
            frame.image.width(),
            frame.image.height(),
            output_path.display(),
        );

        tracker.advance(Some(frame.index));
    }

    tracker.finish();
    Ok(tracker.current())
}

fn check_frame_size(frame_size: &FrameSize) -> Result<(), GifPackError> {
    if frame_size.height == 0 {
        return Err(GifPackError::NonPositiveDimension {
            field: "frame height",
            value: 0,
        });
    }
    if frame_size.width == Some(0) {
        return Err(GifPackError::NonPositiveDimension {
            field: "frame width",
            value: 0,
        });
    }
    Ok(())
}

/// Bytes per RGBA8 pixel.
const RGBA8_BYTES: u64 = 4;

/// Bytes per pixel of the `f32` RGBA buffer `imageops::resize` fills in its
/// vertical pass, which keeps the source width.
const RGBA32F_BYTES: u64 = 16;

fn check_allocation(
    source_width: u32,
    width: u32,
    height: u32,
    limit: u64,
) -> Result<(), GifPackError> {
    let buffer_bytes = |w: u32, bytes_per_pixel: u64| {
        u64::from(w)
            .checked_mul(u64::from(height))
            .and_then(|count| count.checked_mul(bytes_per_pixel))
            .unwrap_or(u64::MAX)
    };
    let bytes = buffer_bytes(width, RGBA8_BYTES).max(buffer_bytes(source_width, RGBA32F_BYTES));

    if bytes > limit {
        return Err(GifPackError::FrameTooLarge {
            width,
            height,
            bytes,
            limit,
        });
    }
    Ok(())
}
