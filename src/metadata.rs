//! GIF metadata types.
//!
//! [`GifMetadata`] is returned by [`GifProbe::probe`](crate::GifProbe::probe).

use std::time::Duration;

/// Summary of an animated GIF.
///
/// # Example
///
/// ```no_run
/// use gifpack::GifProbe;
///
/// let metadata = GifProbe::probe("capoo.gif").unwrap();
/// println!("{}x{}, {} frames", metadata.width, metadata.height, metadata.frame_count);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct GifMetadata {
    /// Logical screen width in pixels.
    pub width: u32,
    /// Logical screen height in pixels.
    pub height: u32,
    /// Number of frames in the animation.
    pub frame_count: u64,
    /// Sum of all frame delays.
    pub total_duration: Duration,
    /// Per-frame delays in file order.
    pub frame_delays: Vec<Duration>,
}

impl GifMetadata {
    /// Mean frame delay, or `None` for an empty animation.
    pub fn average_delay(&self) -> Option<Duration> {
        u32::try_from(self.frame_count)
            .ok()
            .filter(|&count| count > 0)
            .map(|count| self.total_duration / count)
    }
}
