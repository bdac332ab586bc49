//! GIF source and lazy frame iteration.
//!
//! [`GifSource`] opens an animated GIF and exposes its logical screen size.
//! [`GifSource::frames`] consumes the source and returns a [`FrameIterator`]
//! that decodes one frame per call to [`next()`](Iterator::next), so a long
//! animation is never buffered in memory as a whole.
//!
//! # Example
//!
//! ```no_run
//! use gifpack::GifSource;
//!
//! let source = GifSource::open("capoo.gif")?;
//! for frame in source.frames() {
//!     let frame = frame?;
//!     println!("frame {} is {}x{}", frame.index, frame.image.width(), frame.image.height());
//! }
//! # Ok::<(), gifpack::GifPackError>(())
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use image::{AnimationDecoder, Frames, ImageDecoder, RgbaImage, codecs::gif::GifDecoder};

use crate::error::GifPackError;

/// An opened GIF file, ready to be iterated.
///
/// The file handle lives inside the decoder. It is released when the source,
/// or the [`FrameIterator`] created from it, is dropped.
pub struct GifSource {
    decoder: GifDecoder<BufReader<File>>,
    path: PathBuf,
    width: u32,
    height: u32,
}

impl Debug for GifSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GifSource")
            .field("path", &self.path)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl GifSource {
    /// Open a GIF file and read its header.
    ///
    /// # Errors
    ///
    /// Returns [`GifPackError::FileOpen`] if the file cannot be opened, or
    /// [`GifPackError::ImageError`] if it is not a decodable GIF.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GifPackError> {
        let path = path.as_ref().to_path_buf();

        log::debug!("Opening GIF file: {}", path.display());

        let file = File::open(&path).map_err(|error| GifPackError::FileOpen {
            path: path.clone(),
            reason: error.to_string(),
        })?;
        let decoder = GifDecoder::new(BufReader::new(file))?;
        let (width, height) = decoder.dimensions();

        Ok(Self {
            decoder,
            path,
            width,
            height,
        })
    }

    /// Logical screen size of the animation as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the source and iterate its frames in file order.
    pub fn frames(self) -> FrameIterator {
        FrameIterator {
            frames: self.decoder.into_frames(),
            next_index: 0,
            done: false,
        }
    }
}

/// One decoded frame, normalized to RGBA8.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Zero-based position of the frame in the source.
    pub index: u64,
    /// Frame pixels in four-channel RGBA.
    pub image: RgbaImage,
    /// How long the frame is shown.
    pub delay: Duration,
}

/// A lazy iterator over the frames of a [`GifSource`].
///
/// The iterator is finite and cannot be restarted; open the source again to
/// read the frames a second time. Iteration stops after the first decode
/// error is yielded.
pub struct FrameIterator {
    frames: Frames<'static>,
    next_index: u64,
    done: bool,
}

impl Iterator for FrameIterator {
    type Item = Result<DecodedFrame, GifPackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let frame = match self.frames.next()? {
            Ok(frame) => frame,
            Err(error) => {
                self.done = true;
                return Some(Err(error.into()));
            }
        };

        let (numerator, denominator) = frame.delay().numer_denom_ms();
        let delay = if denominator == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(u64::from(numerator) * 1_000_000 / u64::from(denominator))
        };

        // The GIF decoder composites palette and transparency into RGBA8.
        let image = frame.into_buffer();

        let index = self.next_index;
        self.next_index += 1;

        Some(Ok(DecodedFrame {
            index,
            image,
            delay,
        }))
    }
}
