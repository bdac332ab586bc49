//! Lightweight GIF probing.
//!
//! [`GifProbe`] decodes a GIF once to count its frames and sum their delays,
//! then closes the file. Nothing is written to disk.

use std::path::Path;
use std::time::Duration;

use crate::error::GifPackError;
use crate::metadata::GifMetadata;
use crate::source::GifSource;

/// Lightweight GIF probe.
///
/// # Example
///
/// ```no_run
/// use gifpack::GifProbe;
///
/// let metadata = GifProbe::probe("capoo.gif")?;
/// println!("{} frames over {:?}", metadata.frame_count, metadata.total_duration);
/// # Ok::<(), gifpack::GifPackError>(())
/// ```
pub struct GifProbe;

impl GifProbe {
    /// Probe a GIF file and return its metadata.
    ///
    /// GIF has no frame count in its header, so every frame is decoded.
    ///
    /// # Errors
    ///
    /// Returns [`GifPackError::FileOpen`] if the file cannot be opened and
    /// [`GifPackError::ImageError`] if any frame fails to decode.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<GifMetadata, GifPackError> {
        let source = GifSource::open(path)?;
        let (width, height) = source.dimensions();

        let mut frame_delays = Vec::new();
        for frame in source.frames() {
            frame_delays.push(frame?.delay);
        }

        let total_duration = frame_delays.iter().sum::<Duration>();

        Ok(GifMetadata {
            width,
            height,
            frame_count: frame_delays.len() as u64,
            total_duration,
            frame_delays,
        })
    }

    /// Probe multiple GIF files.
    ///
    /// Files that cannot be probed produce an `Err` entry in the result
    /// vector rather than aborting the entire batch.
    pub fn probe_many<P: AsRef<Path>>(paths: &[P]) -> Vec<Result<GifMetadata, GifPackError>> {
        paths.iter().map(Self::probe).collect()
    }
}
