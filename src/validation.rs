//! Frame set validation.
//!
//! [`validate_frame_set`] reads an output directory's `config.json` back and
//! checks it against the files on disk, returning a [`ValidationReport`].
//!
//! # Example
//!
//! ```no_run
//! let report = gifpack::validate_frame_set("capoo")?;
//! if report.is_valid() {
//!     println!("Frame set is complete");
//! } else {
//!     for error in &report.errors {
//!         println!("Error: {error}");
//!     }
//! }
//! # Ok::<(), gifpack::GifPackError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptor::{CONFIG_FILE_NAME, FRAME_DIRECTORY, FRAME_EXTENSION, FrameSetDescriptor};
use crate::error::GifPackError;

/// Missing frames listed individually before the rest are summarised.
const MAX_MISSING_LISTED: u64 = 20;

/// Summary of frame set validation.
///
/// Contains lists of informational notices, warnings, and errors.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Informational notices (not problems).
    pub info: Vec<String>,
    /// Issues the runner tolerates but that are probably mistakes.
    pub warnings: Vec<String>,
    /// Issues that will break the runner.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if no errors were found.
    ///
    /// Warnings do not affect this result.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of entries (info + warnings + errors).
    pub fn issue_count(&self) -> usize {
        self.info.len() + self.warnings.len() + self.errors.len()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for item in &self.info {
            writeln!(f, "[INFO] {item}")?;
        }
        for item in &self.warnings {
            writeln!(f, "[WARN] {item}")?;
        }
        for item in &self.errors {
            writeln!(f, "[ERROR] {item}")?;
        }
        if self.issue_count() == 0 {
            writeln!(f, "No issues found.")?;
        }
        Ok(())
    }
}

/// Validate the frame set rooted at `output_dir`.
///
/// # Errors
///
/// Returns an error only if `config.json` cannot be read or parsed; every
/// other problem is recorded in the report.
pub fn validate_frame_set<P: AsRef<Path>>(output_dir: P) -> Result<ValidationReport, GifPackError> {
    let output_dir = output_dir.as_ref();
    let descriptor = FrameSetDescriptor::from_path(output_dir.join(CONFIG_FILE_NAME))?;
    Ok(check_descriptor(&descriptor, output_dir))
}

fn check_descriptor(descriptor: &FrameSetDescriptor, output_dir: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.info.push(format!(
        "Frame set {:?} ({:?}): {} frame(s) named {}<n>.{}",
        descriptor.id,
        descriptor.display_name,
        descriptor.frame_count,
        descriptor.file_pattern,
        descriptor.frame_extension,
    ));

    // ── Constants ──────────────────────────────────────────────────
    if descriptor.frame_directory != FRAME_DIRECTORY {
        report.errors.push(format!(
            "frameDirectory is {:?}, expected {FRAME_DIRECTORY:?}",
            descriptor.frame_directory,
        ));
    }
    if descriptor.frame_extension != FRAME_EXTENSION {
        report.errors.push(format!(
            "frameExtension is {:?}, expected {FRAME_EXTENSION:?}",
            descriptor.frame_extension,
        ));
    }
    if descriptor.file_pattern.is_empty() {
        report.errors.push("filePattern is empty".to_string());
    }
    if descriptor.frame_size.height == 0 || descriptor.frame_size.width == Some(0) {
        report.errors.push(format!(
            "frameSize has a zero dimension: {:?}",
            descriptor.frame_size,
        ));
    }
    if descriptor.frame_count == 0 {
        report
            .warnings
            .push("frameCount is zero, the runner has nothing to animate".to_string());
    }

    // ── Frames ─────────────────────────────────────────────────────
    let frames_dir = output_dir.join(&descriptor.frame_directory);
    let on_disk = fs::read_dir(&frames_dir)
        .map(|entries| entries.filter_map(Result::ok).count() as u64)
        .unwrap_or(0);
    // Past this many indices at least `MAX_MISSING_LISTED` frames are missing.
    let checked = descriptor
        .frame_count
        .min(on_disk.saturating_add(MAX_MISSING_LISTED));

    let mut found = 0_u64;
    for path in descriptor.frame_paths(output_dir).take(usize::try_from(checked).unwrap_or(usize::MAX)) {
        if !path.is_file() {
            report.errors.push(format!("Missing frame {}", path.display()));
            continue;
        }
        found += 1;

        match image::image_dimensions(&path) {
            Ok((width, height)) => {
                if height != descriptor.frame_size.height {
                    report.warnings.push(format!(
                        "Frame {} is {height}px high, expected {}",
                        path.display(),
                        descriptor.frame_size.height,
                    ));
                }
                if let Some(expected_width) = descriptor.frame_size.width {
                    if width != expected_width {
                        report.warnings.push(format!(
                            "Frame {} is {width}px wide, expected {expected_width}",
                            path.display(),
                        ));
                    }
                }
            }
            Err(error) => {
                report
                    .errors
                    .push(format!("Unreadable frame {}: {error}", path.display()));
            }
        }
    }
    if checked < descriptor.frame_count {
        report.errors.push(format!(
            "frameCount {} exceeds the {on_disk} file(s) in {}, only the first {checked} frame(s) were checked",
            descriptor.frame_count,
            frames_dir.display(),
        ));
        report
            .info
            .push(format!("{found} of the first {checked} frame(s) present"));
    } else {
        report
            .info
            .push(format!("{found} of {} frame(s) present", descriptor.frame_count));
    }

    // ── Stray files ────────────────────────────────────────────────
    if let Ok(entries) = fs::read_dir(&frames_dir) {
        let mut stray: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(|name| descriptor.frame_index(name))
                    .is_none()
            })
            .map(|entry| entry.path())
            .collect();
        stray.sort();
        for path in stray {
            report
                .warnings
                .push(format!("Unexpected file {}", path.display()));
        }
    }

    report
}
