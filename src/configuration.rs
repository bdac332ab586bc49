//! Export configuration.
//!
//! [`ExportOptions`] is a builder that threads the target frame size, the
//! resampling filter, and progress reporting through
//! [`export_frames_with_options`](crate::export_frames_with_options) without
//! widening every function signature.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gifpack::{ExportOptions, ProgressCallback, ProgressInfo, ResizeFilter};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:?}: {} done", info.operation, info.current);
//!     }
//! }
//!
//! let options = ExportOptions::new(64)
//!     .with_width(Some(48))
//!     .with_filter(ResizeFilter::CatmullRom)
//!     .with_progress(Arc::new(LogProgress))
//!     .with_batch_size(10);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::progress::{NoOpProgress, ProgressCallback};

/// Target dimensions of every exported frame.
///
/// The same value is recorded as `frameSize` in the frame set descriptor.
/// `height` is always fixed; `width` is either fixed or, when `None`,
/// derived per frame from that frame's own aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    /// Fixed output width, or `None` to preserve each frame's aspect ratio.
    pub width: Option<u32>,
    /// Output height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Create a frame size with a fixed height and derived width.
    pub fn with_height(height: u32) -> Self {
        Self {
            width: None,
            height,
        }
    }

    /// Create a frame size with both dimensions fixed.
    pub fn exact(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height,
        }
    }

    /// Resolve the output dimensions for a frame of the given source size.
    ///
    /// Returns `(width, height)`. A derived width is
    /// `source_width * height / source_height` with the fraction truncated,
    /// and never less than 1.
    pub fn resolve(&self, source_width: u32, source_height: u32) -> (u32, u32) {
        if let Some(width) = self.width {
            return (width, self.height);
        }

        if source_height == 0 {
            return (source_width.max(1), self.height);
        }

        let derived =
            u64::from(source_width) * u64::from(self.height) / u64::from(source_height);
        let derived = u32::try_from(derived).unwrap_or(u32::MAX);

        if derived == 0 {
            log::warn!(
                "Derived width for {source_width}x{source_height} frame at height {} is zero, using 1",
                self.height,
            );
        }

        (derived.max(1), self.height)
    }
}

/// Resampling filter used when resizing frames.
///
/// Maps onto [`image::imageops::FilterType`]. The default is Lanczos3, a
/// sinc-windowed filter that keeps pixel-art edges reasonably crisp when
/// shrinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    /// Nearest-neighbour sampling.
    Nearest,
    /// Linear (tent) filter.
    Triangle,
    /// Cubic filter.
    CatmullRom,
    /// Gaussian filter.
    Gaussian,
    /// Lanczos with window 3. This is the default.
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    /// Map to the corresponding `image` filter constant.
    pub(crate) fn to_filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Configuration for frame export.
///
/// Carries the target frame size plus optional filter and progress
/// settings. Pass a reference to
/// [`export_frames_with_options`](crate::export_frames_with_options) or
/// [`generate`](crate::generate).
#[derive(Clone)]
pub struct ExportOptions {
    /// Target size of each frame.
    pub(crate) frame_size: FrameSize,
    /// Resampling filter.
    pub(crate) filter: ResizeFilter,
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// How often to fire the progress callback (every N frames).
    pub(crate) batch_size: u64,
}

impl Debug for ExportOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExportOptions")
            .field("frame_size", &self.frame_size)
            .field("filter", &self.filter)
            .field("has_progress", &true)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

/// Frame height used by [`ExportOptions::default`].
pub const DEFAULT_FRAME_HEIGHT: u32 = 64;

impl Default for ExportOptions {
    /// Lanczos3, no progress callback, batch size 1, and a frame height of
    /// [`DEFAULT_FRAME_HEIGHT`]. Suits [`generate`](crate::generate), which
    /// takes the frame size from its request.
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_HEIGHT)
    }
}

impl ExportOptions {
    /// Create options for the given target height.
    ///
    /// Defaults: derived width, Lanczos3, no progress callback, batch size 1.
    pub fn new(height: u32) -> Self {
        Self::from_frame_size(FrameSize::with_height(height))
    }

    /// Create options from a complete [`FrameSize`].
    pub fn from_frame_size(frame_size: FrameSize) -> Self {
        Self {
            frame_size,
            filter: ResizeFilter::default(),
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }

    /// Set a fixed output width. `None` derives it from each frame.
    #[must_use]
    pub fn with_width(mut self, width: Option<u32>) -> Self {
        self.frame_size.width = width;
        self
    }

    /// Replace the whole target frame size.
    #[must_use]
    pub fn with_frame_size(mut self, frame_size: FrameSize) -> Self {
        self.frame_size = frame_size;
        self
    }

    /// Set the resampling filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires.
    ///
    /// A value of 1 means every frame. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// The configured target frame size.
    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    /// The configured resampling filter.
    pub fn filter(&self) -> ResizeFilter {
        self.filter
    }
}
