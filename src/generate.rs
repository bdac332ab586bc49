//! The generate action.
//!
//! [`generate`] turns one validated [`GenerateRequest`] into a finished
//! frame set on disk:
//!
//! ```text
//! <base_dir>/<output_name>/
//!     config.json
//!     frames/<pattern>0.png
//!     frames/<pattern>1.png
//!     ...
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gifpack::{ExportOptions, FormInput, GenerateRequest};
//!
//! let form = FormInput {
//!     gif_path: "capoo.gif".into(),
//!     title: "Capoo".into(),
//!     gif_id: "capoo1".into(),
//!     file_pattern: "capoo-".into(),
//!     height: "64".into(),
//!     width: String::new(),
//!     output_dir: "capoo".into(),
//! };
//! let request = GenerateRequest::from_form(&form)?;
//! let outcome = gifpack::generate(".", &request, &ExportOptions::default())?;
//! println!("{} frames in {}", outcome.frame_count, outcome.output_dir.display());
//! # Ok::<(), gifpack::GifPackError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::configuration::ExportOptions;
use crate::descriptor::{CONFIG_FILE_NAME, FRAME_DIRECTORY, FrameSetDescriptor};
use crate::error::GifPackError;
use crate::export::export_frames_with_options;
use crate::progress::{OperationType, ProgressTracker};
use crate::request::GenerateRequest;

/// What a successful generate action wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    /// The newly created output directory.
    pub output_dir: PathBuf,
    /// The `frames` subdirectory holding the PNGs.
    pub frames_dir: PathBuf,
    /// Path of the written `config.json`.
    pub config_path: PathBuf,
    /// Number of frames exported.
    pub frame_count: u64,
}

/// Run one generate action.
///
/// The request's frame size replaces the one in `options`; the filter and
/// progress settings of `options` are used as given.
///
/// # Errors
///
/// - [`GifPackError::OutputExists`] if `base_dir/output_name` already
///   exists. Nothing is written in that case.
/// - Any error from [`export_frames_with_options`] or
///   [`FrameSetDescriptor::write`]. Files written before the failure are
///   left in place.
pub fn generate<B: AsRef<Path>>(
    base_dir: B,
    request: &GenerateRequest,
    options: &ExportOptions,
) -> Result<GenerateOutcome, GifPackError> {
    let output_dir = base_dir.as_ref().join(&request.output_name);
    if output_dir.exists() {
        return Err(GifPackError::OutputExists { path: output_dir });
    }

    let frames_dir = output_dir.join(FRAME_DIRECTORY);
    fs::create_dir_all(&output_dir)?;
    fs::create_dir(&frames_dir)?;

    log::debug!("Created output directory {}", output_dir.display());

    let options = options.clone().with_frame_size(request.frame_size);
    let frame_count = export_frames_with_options(
        &request.gif_path,
        &frames_dir,
        &request.file_pattern,
        &options,
    )?;

    let config_path = output_dir.join(CONFIG_FILE_NAME);
    let mut tracker = ProgressTracker::new(
        options.progress.clone(),
        OperationType::ConfigWrite,
        Some(1),
        1,
    );
    FrameSetDescriptor::new(
        request.gif_id.as_str(),
        request.title.as_str(),
        request.file_pattern.as_str(),
        request.frame_size,
        frame_count,
    )
    .write(&config_path)?;
    tracker.advance(None);

    log::info!(
        "Generated {frame_count} frame(s) for {:?} in {}",
        request.gif_id,
        output_dir.display(),
    );

    Ok(GenerateOutcome {
        output_dir,
        frames_dir,
        config_path,
        frame_count,
    })
}
