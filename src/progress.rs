//! Progress reporting.
//!
//! This module provides [`ProgressCallback`] for monitoring long exports and
//! [`ProgressInfo`] for the snapshots delivered to it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gifpack::{ExportOptions, GifPackError, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("[{:?}] {} frame(s) written", info.operation, info.current);
//!     }
//! }
//!
//! let options = ExportOptions::new(64).with_progress(Arc::new(PrintProgress));
//! let count = gifpack::export_frames_with_options("capoo.gif", "out/frames", "capoo-", &options)?;
//! # Ok::<(), GifPackError>(())
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// The kind of operation currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Decoding, resizing, and saving frames.
    FrameExport,
    /// Writing the frame set descriptor.
    ConfigWrite,
}

/// A snapshot of export progress.
///
/// Delivered to [`ProgressCallback::on_progress`] at a cadence controlled
/// by [`ExportOptions::with_batch_size`](crate::ExportOptions::with_batch_size).
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// What kind of work is being performed.
    pub operation: OperationType,
    /// How many items have been processed so far.
    pub current: u64,
    /// Total items expected, if known ahead of time.
    ///
    /// GIF frames are decoded lazily, so frame export reports `None`.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the operation started.
    pub elapsed: Duration,
    /// Zero-based index of the frame just written (frame export only).
    pub current_frame: Option<u64>,
}

/// Trait for receiving progress updates during export.
///
/// Implementations must be [`Send`] and [`Sync`] so a callback can forward
/// reports to another thread, e.g. a UI event loop.
///
/// Progress callbacks are **infallible**: they observe but cannot halt
/// the operation.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals during an operation.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Internal helper that tracks progress timing and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    operation: OperationType,
    total: Option<u64>,
    current: u64,
    batch_size: u64,
    start_time: Instant,
    items_since_last_report: u64,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        operation: OperationType,
        total: Option<u64>,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            operation,
            total,
            current: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            items_since_last_report: 0,
        }
    }

    /// Record one completed item and fire the callback if the batch
    /// threshold is reached.
    pub(crate) fn advance(&mut self, frame_index: Option<u64>) {
        self.current += 1;
        self.items_since_last_report += 1;

        if self.items_since_last_report >= self.batch_size {
            self.report(frame_index);
            self.items_since_last_report = 0;
        }
    }

    /// Unconditionally emit a final progress report.
    pub(crate) fn finish(&mut self) {
        self.report(None);
    }

    /// Number of items recorded so far.
    pub(crate) fn current(&self) -> u64 {
        self.current
    }

    fn report(&self, frame_index: Option<u64>) {
        let percentage = self
            .total
            .filter(|&t| t > 0)
            .map(|t| (self.current as f32 / t as f32) * 100.0);

        let info = ProgressInfo {
            operation: self.operation,
            current: self.current,
            total: self.total,
            percentage,
            elapsed: self.start_time.elapsed(),
            current_frame: frame_index,
        };

        self.callback.on_progress(&info);
    }
}
