//! Generate request parsing.
//!
//! A front end collects seven free-form strings from the user.
//! [`GenerateRequest::from_form`] turns them into a typed request or the
//! first validation error, before anything touches the disk.

use std::path::{Path, PathBuf};

use crate::configuration::FrameSize;
use crate::error::GifPackError;

/// Raw user input, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    /// Path of the source GIF.
    pub gif_path: String,
    /// Display title.
    pub title: String,
    /// Frame set identifier.
    pub gif_id: String,
    /// Frame file name prefix.
    pub file_pattern: String,
    /// Frame height; required.
    pub height: String,
    /// Frame width; empty means derived.
    pub width: String,
    /// Name of the output directory to create.
    pub output_dir: String,
}

/// A validated generate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Existing GIF file to split.
    pub gif_path: PathBuf,
    /// Display title.
    pub title: String,
    /// Frame set identifier.
    pub gif_id: String,
    /// Frame file name prefix.
    pub file_pattern: String,
    /// Target size of every frame.
    pub frame_size: FrameSize,
    /// Output directory name, resolved against a base directory by
    /// [`generate`](crate::generate).
    pub output_name: String,
}

impl GenerateRequest {
    /// Validate a form.
    ///
    /// All fields are trimmed. They are checked in form order (gif path,
    /// title, id, pattern, height, width, output name) and the first
    /// failure is returned.
    ///
    /// # Errors
    ///
    /// - [`GifPackError::EmptyField`] for a blank required field.
    /// - [`GifPackError::InvalidSource`] if the gif path is not an existing
    ///   file.
    /// - [`GifPackError::InvalidInteger`] /
    ///   [`GifPackError::NonPositiveDimension`] for a bad height or width.
    pub fn from_form(form: &FormInput) -> Result<Self, GifPackError> {
        let gif_path = require_source(&form.gif_path)?;
        let title = require_text(&form.title, "title")?;
        let gif_id = require_text(&form.gif_id, "id")?;
        let file_pattern = require_text(&form.file_pattern, "file pattern")?;
        let height = require_dimension(&form.height, "frame height")?;
        let width = optional_dimension(&form.width, "frame width")?;
        let output_name = require_text(&form.output_dir, "output directory name")?;

        Ok(Self {
            gif_path,
            title,
            gif_id,
            file_pattern,
            frame_size: FrameSize { width, height },
            output_name,
        })
    }
}

fn require_text(value: &str, field: &'static str) -> Result<String, GifPackError> {
    let text = value.trim();
    if text.is_empty() {
        return Err(GifPackError::EmptyField { field });
    }
    Ok(text.to_string())
}

fn require_dimension(value: &str, field: &'static str) -> Result<u32, GifPackError> {
    let text = require_text(value, field)?;
    parse_dimension(&text, field)
}

fn optional_dimension(value: &str, field: &'static str) -> Result<Option<u32>, GifPackError> {
    let text = value.trim();
    if text.is_empty() {
        return Ok(None);
    }
    parse_dimension(text, field).map(Some)
}

fn parse_dimension(text: &str, field: &'static str) -> Result<u32, GifPackError> {
    let invalid = || GifPackError::InvalidInteger {
        field,
        value: text.to_string(),
    };

    let number = text.parse::<i64>().map_err(|_| invalid())?;
    if number <= 0 {
        return Err(GifPackError::NonPositiveDimension {
            field,
            value: number,
        });
    }
    u32::try_from(number).map_err(|_| invalid())
}

fn require_source(value: &str) -> Result<PathBuf, GifPackError> {
    let text = value.trim();
    if text.is_empty() {
        return Err(GifPackError::EmptyField { field: "GIF file" });
    }

    let path = Path::new(text);
    if !path.is_file() {
        return Err(GifPackError::InvalidSource {
            path: path.to_path_buf(),
        });
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_trimmed() {
        assert_eq!(require_text("  Capoo \n", "title").unwrap(), "Capoo");
    }

    #[test]
    fn blank_text_rejected() {
        let error = require_text(" \t ", "title").unwrap_err();
        assert!(matches!(error, GifPackError::EmptyField { field: "title" }));
        assert!(error.is_validation());
    }

    #[test]
    fn dimension_parsing() {
        assert_eq!(require_dimension(" 64 ", "h").unwrap(), 64);
        assert_eq!(require_dimension("+8", "h").unwrap(), 8);
        assert!(matches!(
            require_dimension("6.4", "h"),
            Err(GifPackError::InvalidInteger { .. })
        ));
        assert!(matches!(
            require_dimension("abc", "h"),
            Err(GifPackError::InvalidInteger { .. })
        ));
        assert!(matches!(
            require_dimension("", "h"),
            Err(GifPackError::EmptyField { .. })
        ));
        assert!(matches!(
            require_dimension("0", "h"),
            Err(GifPackError::NonPositiveDimension { value: 0, .. })
        ));
        assert!(matches!(
            require_dimension("-3", "h"),
            Err(GifPackError::NonPositiveDimension { value: -3, .. })
        ));
        assert!(matches!(
            require_dimension("99999999999", "h"),
            Err(GifPackError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn optional_width() {
        assert_eq!(optional_dimension("   ", "w").unwrap(), None);
        assert_eq!(optional_dimension("48", "w").unwrap(), Some(48));
        assert!(optional_dimension("wide", "w").is_err());
    }

    #[test]
    fn missing_source_rejected() {
        assert!(matches!(
            require_source(""),
            Err(GifPackError::EmptyField { .. })
        ));
        assert!(matches!(
            require_source("definitely/not/here.gif"),
            Err(GifPackError::InvalidSource { .. })
        ));
    }
}
