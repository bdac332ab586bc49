//! Frame export integration tests.

mod common;

use std::sync::{Arc, Mutex};

use gifpack::{
    ExportOptions, GifPackError, OperationType, ProgressCallback, ProgressInfo, ResizeFilter,
};
use image::ColorType;

use common::{file_names, write_gif};

#[test]
fn writes_one_png_per_frame() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 40, 20, 5);
    let frames_dir = directory.path().join("frames");

    let count = gifpack::export_frames(&gif, &frames_dir, "capoo-", 10, None)
        .expect("Export failed");

    assert_eq!(count, 5);
    assert_eq!(
        file_names(&frames_dir),
        vec!["capoo-0.png", "capoo-1.png", "capoo-2.png", "capoo-3.png", "capoo-4.png"]
    );
}

#[test]
fn derived_width_preserves_aspect_ratio() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "wide.gif", 40, 20, 3);
    let frames_dir = directory.path().join("frames");

    gifpack::export_frames(&gif, &frames_dir, "f", 10, None).expect("Export failed");

    for index in 0..3 {
        let dimensions = image::image_dimensions(frames_dir.join(format!("f{index}.png")))
            .expect("Failed to read frame");
        assert_eq!(dimensions, (20, 10));
    }
}

#[test]
fn derived_width_truncates_fraction() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    // 30 * 7 / 20 = 10.5
    let gif = write_gif(directory.path(), "odd.gif", 30, 20, 2);
    let frames_dir = directory.path().join("frames");

    gifpack::export_frames(&gif, &frames_dir, "f", 7, None).expect("Export failed");

    let dimensions =
        image::image_dimensions(frames_dir.join("f0.png")).expect("Failed to read frame");
    assert_eq!(dimensions, (10, 7));
}

#[test]
fn fixed_width_applies_to_every_frame() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 40, 20, 4);
    let frames_dir = directory.path().join("frames");

    let count = gifpack::export_frames(&gif, &frames_dir, "c", 9, Some(7)).expect("Export failed");

    assert_eq!(count, 4);
    for index in 0..4 {
        let dimensions = image::image_dimensions(frames_dir.join(format!("c{index}.png")))
            .expect("Failed to read frame");
        assert_eq!(dimensions, (7, 9));
    }
}

#[test]
fn frames_are_saved_as_rgba() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 16, 16, 1);
    let frames_dir = directory.path().join("frames");

    gifpack::export_frames(&gif, &frames_dir, "c", 8, None).expect("Export failed");

    let frame = image::open(frames_dir.join("c0.png")).expect("Failed to open frame");
    assert_eq!(frame.color(), ColorType::Rgba8);

    // Corner pixels sample only one side of the fixture's transparent quadrant.
    let frame = frame.into_rgba8();
    assert_eq!(frame.dimensions(), (8, 8));
    assert_eq!(frame.get_pixel(0, 0)[3], 0);
    assert_eq!(frame.get_pixel(7, 7)[3], 255);
}

#[test]
fn missing_destination_parents_are_created() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 8, 8, 2);
    let frames_dir = directory.path().join("a").join("b").join("frames");

    let count = gifpack::export_frames(&gif, &frames_dir, "c", 4, None).expect("Export failed");

    assert_eq!(count, 2);
    assert!(frames_dir.is_dir());
}

#[test]
fn existing_destination_is_reused() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 8, 8, 2);
    let frames_dir = directory.path().join("frames");
    std::fs::create_dir(&frames_dir).expect("Failed to create frames dir");

    let count = gifpack::export_frames(&gif, &frames_dir, "c", 4, None).expect("Export failed");
    assert_eq!(count, 2);
}

#[test]
fn destination_under_regular_file_fails() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 8, 8, 3);
    let blocker = directory.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").expect("Failed to write blocker");

    let result = gifpack::export_frames(&gif, blocker.join("frames"), "c", 4, None);

    assert!(matches!(result, Err(GifPackError::IoError(_))));
    assert!(blocker.is_file());
    assert_eq!(
        std::fs::read(&blocker).expect("Failed to read blocker"),
        b"not a directory"
    );
}

#[test]
fn destination_that_is_a_file_fails() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 8, 8, 3);
    let blocker = directory.path().join("frames");
    std::fs::write(&blocker, b"").expect("Failed to write blocker");

    let result = gifpack::export_frames(&gif, &blocker, "c", 4, None);
    assert!(matches!(result, Err(GifPackError::IoError(_))));
}

#[test]
fn nonexistent_source_fails_to_open() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let result = gifpack::export_frames(
        directory.path().join("missing.gif"),
        directory.path().join("frames"),
        "c",
        4,
        None,
    );

    let error = result.unwrap_err();
    assert!(matches!(error, GifPackError::FileOpen { .. }));
    assert!(
        error.to_string().contains("Failed to open GIF file"),
        "Unexpected message: {error}"
    );
}

#[test]
fn invalid_source_fails_to_decode() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let bogus = directory.path().join("bogus.gif");
    std::fs::write(&bogus, b"this is not a gif").expect("Failed to write bogus file");
    let frames_dir = directory.path().join("frames");

    let result = gifpack::export_frames(&bogus, &frames_dir, "c", 4, None);

    assert!(matches!(result, Err(GifPackError::ImageError(_))));
    assert!(file_names(&frames_dir).is_empty());
}

#[test]
fn zero_height_is_rejected() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 8, 8, 1);

    let result = gifpack::export_frames(&gif, directory.path().join("frames"), "c", 0, None);
    assert!(matches!(
        result,
        Err(GifPackError::NonPositiveDimension { value: 0, .. })
    ));
}

#[test]
fn huge_target_size_is_an_error() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 8, 8, 2);
    let frames_dir = directory.path().join("frames");

    let result = gifpack::export_frames(&gif, &frames_dir, "c", u32::MAX, Some(u32::MAX));
    assert!(
        matches!(result, Err(GifPackError::FrameTooLarge { .. })),
        "Unexpected result: {result:?}"
    );

    let result = gifpack::export_frames(&gif, &frames_dir, "c", 100_000, None);
    let error = result.unwrap_err();
    assert!(matches!(
        error,
        GifPackError::FrameTooLarge {
            width: 100_000,
            height: 100_000,
            ..
        }
    ));
    assert!(!error.is_validation());
    assert!(file_names(&frames_dir).is_empty());
}

#[test]
fn nearest_filter_still_resizes() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 20, 10, 2);
    let frames_dir = directory.path().join("frames");

    let options = ExportOptions::new(5).with_filter(ResizeFilter::Nearest);
    let count = gifpack::export_frames_with_options(&gif, &frames_dir, "n", &options)
        .expect("Export failed");

    assert_eq!(count, 2);
    let dimensions =
        image::image_dimensions(frames_dir.join("n1.png")).expect("Failed to read frame");
    assert_eq!(dimensions, (10, 5));
}

struct RecordingProgress {
    infos: Mutex<Vec<ProgressInfo>>,
}

impl ProgressCallback for RecordingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.infos.lock().unwrap().push(info.clone());
    }
}

#[test]
fn progress_reports_each_frame() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 8, 8, 4);
    let recording = Arc::new(RecordingProgress {
        infos: Mutex::new(Vec::new()),
    });

    let options = ExportOptions::new(4).with_progress(recording.clone());
    gifpack::export_frames_with_options(&gif, directory.path().join("frames"), "p", &options)
        .expect("Export failed");

    let infos = recording.infos.lock().unwrap();
    // One report per frame plus the final one.
    assert_eq!(infos.len(), 5);
    assert!(infos.iter().all(|info| info.operation == OperationType::FrameExport));
    assert!(infos.iter().all(|info| info.total.is_none()));
    let frames: Vec<Option<u64>> = infos.iter().map(|info| info.current_frame).collect();
    assert_eq!(frames, vec![Some(0), Some(1), Some(2), Some(3), None]);
    assert_eq!(infos.last().map(|info| info.current), Some(4));
}

#[test]
fn each_export_reopens_the_source() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let gif = write_gif(directory.path(), "capoo.gif", 8, 8, 3);

    let first = gifpack::export_frames(&gif, directory.path().join("one"), "c", 4, None)
        .expect("First export failed");
    let second = gifpack::export_frames(&gif, directory.path().join("two"), "c", 4, None)
        .expect("Second export failed");

    assert_eq!(first, 3);
    assert_eq!(second, 3);
}
