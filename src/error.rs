//! Error types for the `gifpack` crate.
//!
//! This module defines [`GifPackError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry the context needed to
//! show a useful message: file paths, form field names, and the offending
//! input values.

use std::{io::Error as IoError, path::PathBuf};

use image::ImageError;
use serde_json::Error as JsonError;
use thiserror::Error;

/// The unified error type for all `gifpack` operations.
///
/// Variants fall into two groups. Validation errors describe bad user input
/// and are detected before anything is written to disk; see
/// [`is_validation`](GifPackError::is_validation). Everything else is an I/O
/// or decode failure raised while frames or the config are being produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GifPackError {
    /// The source image could not be opened.
    #[error("Failed to open GIF file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::GifSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// A required text field was empty or whitespace only.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Human-readable name of the field.
        field: &'static str,
    },

    /// A numeric field did not parse as an integer.
    #[error("{field} must be an integer (got {value:?})")]
    InvalidInteger {
        /// Human-readable name of the field.
        field: &'static str,
        /// The trimmed text that failed to parse.
        value: String,
    },

    /// A frame dimension was zero or negative.
    #[error("{field} must be a positive integer (got {value})")]
    NonPositiveDimension {
        /// Human-readable name of the field.
        field: &'static str,
        /// The parsed value.
        value: i64,
    },

    /// The selected source is not an existing regular file.
    #[error("GIF file {path} is not valid, please choose another one")]
    InvalidSource {
        /// The path that was checked.
        path: PathBuf,
    },

    /// The output directory already exists.
    #[error("Output directory {path} already exists, choose another name")]
    OutputExists {
        /// The directory that was found on disk.
        path: PathBuf,
    },

    /// A `config.json` on disk could not be interpreted as a frame set.
    #[error("Invalid frame set descriptor at {path}: {reason}")]
    InvalidDescriptor {
        /// Path of the descriptor file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A resized frame would need more memory than the image allocation limit.
    #[error("Frame of {width}x{height} needs {bytes} bytes, over the {limit} byte limit")]
    FrameTooLarge {
        /// Requested output width.
        width: u32,
        /// Requested output height.
        height: u32,
        /// Bytes the resize would allocate, saturated at `u64::MAX`.
        bytes: u64,
        /// The allocation limit in bytes.
        limit: u64,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while decoding, resizing, or encoding.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// The config descriptor could not be serialized.
    #[error("JSON error: {0}")]
    JsonError(#[from] JsonError),
}

impl GifPackError {
    /// Returns `true` for errors caused by invalid user input.
    ///
    /// These are raised before any file is created, so the message can be
    /// shown to the user as-is and the action retried with corrected input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GifPackError::EmptyField { .. }
                | GifPackError::InvalidInteger { .. }
                | GifPackError::NonPositiveDimension { .. }
                | GifPackError::InvalidSource { .. }
                | GifPackError::OutputExists { .. }
        )
    }
}
