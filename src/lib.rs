//! # gifpack
//!
//! Split animated GIFs into resized PNG frame sets, each described by a
//! `config.json` for a CPU-paced animation runner.
//!
//! `gifpack` decodes GIFs with the [`image`] crate, normalizes each frame to
//! RGBA8, resizes it to a fixed height (and optionally a fixed width), and
//! writes the frames as numbered PNGs next to a fixed-shape JSON descriptor.
//!
//! ## Quick Start
//!
//! ### Generate a frame set
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
//!     width: "".into(),
//!     output_dir: "capoo".into(),
//! };
//!
//! let request = GenerateRequest::from_form(&form).unwrap();
//! let outcome = gifpack::generate(".", &request, &ExportOptions::default()).unwrap();
//! assert_eq!(outcome.config_path, std::path::Path::new("./capoo/config.json"));
//! ```
//!
//! ### Export frames and write the config yourself
//!
//! ```no_run
//! let count = gifpack::export_frames("capoo.gif", "capoo/frames", "capoo-", 64, None).unwrap();
//! gifpack::write_config("capoo/config.json", "capoo1", "Capoo", "capoo-", None, 64, count).unwrap();
//! ```
//!
//! ## Features
//!
//! - **Frame export**: lazy frame decoding, RGBA normalization, per-frame
//!   aspect-ratio preserving resize, selectable resampling filter
//! - **Config descriptor**: bit-exact `config.json` for the runner, and
//!   reading it back
//! - **Input validation**: typed requests from free-form form fields
//! - **Probing**: canvas size, frame count, and total duration of a GIF
//! - **Frame set validation**: check an output directory against its
//!   descriptor
//! - **Progress**: callbacks during long exports

pub mod configuration;
pub mod descriptor;
pub mod error;
pub mod export;
pub mod generate;
pub mod metadata;
pub mod probe;
pub mod progress;
pub mod request;
pub mod source;
pub mod validation;

pub use configuration::{DEFAULT_FRAME_HEIGHT, ExportOptions, FrameSize, ResizeFilter};
pub use descriptor::{
    CONFIG_FILE_NAME, FRAME_DIRECTORY, FRAME_EXTENSION, FrameSetDescriptor, Metric, SpeedPolicy,
    frame_file_name, write_config,
};
pub use error::GifPackError;
pub use export::{export_frames, export_frames_with_options};
pub use generate::{GenerateOutcome, generate};
pub use metadata::GifMetadata;
pub use probe::GifProbe;
pub use progress::{OperationType, ProgressCallback, ProgressInfo};
pub use request::{FormInput, GenerateRequest};
pub use source::{DecodedFrame, FrameIterator, GifSource};
pub use validation::{ValidationReport, validate_frame_set};
