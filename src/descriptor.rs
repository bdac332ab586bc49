//! Frame set descriptor (`config.json`).
//!
//! A [`FrameSetDescriptor`] tells the animation runner where a frame set
//! lives and how to pace it. Field names, their order, and the constant
//! values are a compatibility contract with that consumer:
//!
//! ```json
//! {
//!   "id": "capoo1",
//!   "displayName": "Capoo",
//!   "frameDirectory": "frames",
//!   "filePattern": "capoo-",
//!   "frameCount": 12,
//!   "frameExtension": "png",
//!   "frameSize": {
//!     "width": null,
//!     "height": 64
//!   },
//!   "template": false,
//!   "metric": "cpu",
//!   "speedPolicy": {
//!     "type": "cpuLinear",
//!     "minInterval": 0.01,
//!     "maxInterval": 0.4
//!   }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::configuration::FrameSize;
use crate::error::GifPackError;

/// Name of the frame subdirectory inside an output directory.
pub const FRAME_DIRECTORY: &str = "frames";

/// Extension of every exported frame.
pub const FRAME_EXTENSION: &str = "png";

/// File name of the descriptor inside an output directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Shortest interval between frames, in seconds, at full CPU load.
pub const MIN_INTERVAL: f64 = 0.01;

/// Longest interval between frames, in seconds, at idle.
pub const MAX_INTERVAL: f64 = 0.4;

/// File name of frame `index` for the given pattern: `{pattern}{index}.png`.
///
/// No separator and no zero-padding.
pub fn frame_file_name(file_pattern: &str, index: u64) -> String {
    format!("{file_pattern}{index}.{FRAME_EXTENSION}")
}

/// Which system metric drives the animation speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Overall CPU usage.
    #[default]
    Cpu,
}

/// How the runner maps the metric onto a frame interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SpeedPolicy {
    /// Interpolate linearly between `max_interval` (idle) and
    /// `min_interval` (fully loaded).
    #[serde(rename_all = "camelCase")]
    CpuLinear {
        /// Seconds per frame at full load.
        min_interval: f64,
        /// Seconds per frame at idle.
        max_interval: f64,
    },
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        SpeedPolicy::CpuLinear {
            min_interval: MIN_INTERVAL,
            max_interval: MAX_INTERVAL,
        }
    }
}

/// The `config.json` record describing one exported frame set.
///
/// Built once per generate action and written with
/// [`write`](FrameSetDescriptor::write); it is never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSetDescriptor {
    /// Identifier of the frame set.
    pub id: String,
    /// Title shown to the user.
    pub display_name: String,
    /// Directory holding the frames, relative to the descriptor.
    pub frame_directory: String,
    /// File name prefix of every frame.
    pub file_pattern: String,
    /// Number of frames written by the exporter.
    pub frame_count: u64,
    /// Frame file extension, without the dot.
    pub frame_extension: String,
    /// Target frame size requested at export time.
    pub frame_size: FrameSize,
    /// Whether the set is a template for recolouring. Always `false`.
    pub template: bool,
    /// Metric driving the animation speed.
    pub metric: Metric,
    /// Pacing policy.
    pub speed_policy: SpeedPolicy,
}

impl FrameSetDescriptor {
    /// Build a descriptor with the fixed directory, extension, metric, and
    /// speed policy.
    pub fn new(
        gif_id: impl Into<String>,
        title: impl Into<String>,
        file_pattern: impl Into<String>,
        frame_size: FrameSize,
        frame_count: u64,
    ) -> Self {
        Self {
            id: gif_id.into(),
            display_name: title.into(),
            frame_directory: FRAME_DIRECTORY.to_string(),
            file_pattern: file_pattern.into(),
            frame_count,
            frame_extension: FRAME_EXTENSION.to_string(),
            frame_size,
            template: false,
            metric: Metric::Cpu,
            speed_policy: SpeedPolicy::default(),
        }
    }

    /// Serialize as pretty-printed JSON with two-space indentation.
    ///
    /// Non-ASCII text is written as-is, not `\u` escaped.
    pub fn to_json(&self) -> Result<String, GifPackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the descriptor to `path`, replacing any existing file.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), GifPackError> {
        let path = path.as_ref();
        let json = self.to_json()?;

        log::debug!(
            "Writing frame set descriptor {:?} ({} frames) to {}",
            self.id,
            self.frame_count,
            path.display(),
        );

        fs::write(path, json)?;
        Ok(())
    }

    /// Read a descriptor back from disk.
    ///
    /// # Errors
    ///
    /// Returns [`GifPackError::IoError`] if the file cannot be read and
    /// [`GifPackError::InvalidDescriptor`] if it is not a frame set
    /// descriptor.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GifPackError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        serde_json::from_str(&text).map_err(|error| GifPackError::InvalidDescriptor {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })
    }

    /// Paths of every frame this descriptor names, relative to `root`
    /// (the directory containing `config.json`).
    ///
    /// The paths are produced lazily, so a huge `frameCount` costs nothing
    /// until iterated.
    pub fn frame_paths(&self, root: &Path) -> impl Iterator<Item = PathBuf> + '_ {
        let directory = root.join(&self.frame_directory);
        (0..self.frame_count).map(move |index| {
            directory.join(format!(
                "{}{index}.{}",
                self.file_pattern, self.frame_extension
            ))
        })
    }

    /// Frame index named by `file_name`, if it is one of this descriptor's
    /// frames.
    pub fn frame_index(&self, file_name: &str) -> Option<u64> {
        let digits = file_name
            .strip_prefix(self.file_pattern.as_str())?
            .strip_suffix(self.frame_extension.as_str())?
            .strip_suffix('.')?;
        let index: u64 = digits.parse().ok()?;
        (index.to_string() == digits && index < self.frame_count).then_some(index)
    }
}

/// Build a descriptor from its parts and write it to `config_path`.
///
/// `width` is recorded as `null` when `None`. The file is created or
/// overwritten.
///
/// # Errors
///
/// Returns [`GifPackError::IoError`] if `config_path` is not writable.
pub fn write_config<P: AsRef<Path>>(
    config_path: P,
    gif_id: &str,
    title: &str,
    file_pattern: &str,
    width: Option<u32>,
    height: u32,
    frame_count: u64,
) -> Result<(), GifPackError> {
    let frame_size = FrameSize { width, height };
    FrameSetDescriptor::new(gif_id, title, file_pattern, frame_size, frame_count)
        .write(config_path)
}
