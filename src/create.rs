use crate::{
    encode::VideoWriter,
    select::{expand_frames, frames_per_image, scan_directory},
    timestamp::parse_timezone,
    types::{create_args::CreateArgs, image_record::TimeWindow},
};
use anyhow::{Result, anyhow};
use tracing::info;

/// Selects the images named in `args` and hands them to `writer` as a time-lapse.
///
/// Configuration is validated before the input directory is touched. Finding
/// no images in the window is reported and is not an error.
pub fn run_create(args: &CreateArgs, writer: &mut impl VideoWriter) -> Result<()> {
    let tz = parse_timezone(&args.timezone)?;
    let window = TimeWindow::new(args.start, args.end)?;
    let frames_per_image = frames_per_image(args.duration, args.fps)?;

    if !args.input.is_dir() {
        return Err(anyhow!("Input directory not found: {:?}", args.input));
    }

    info!(
        "Scanning {:?} in {tz} for images between {} and {}",
        args.input, window.start, window.end
    );
    let records = scan_directory(&args.input, &tz, &window)?;

    if records.is_empty() {
        println!("No images found in the specified time range");
        return Ok(());
    }
    println!("Found {} images in the specified time range", records.len());

    let frames = expand_frames(&records, frames_per_image);
    writer.write_video(&frames, args.fps, &args.output)?;

    println!("Video created successfully: {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config_error::ConfigError;
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    #[derive(Default)]
    struct RecordingWriter {
        calls: Vec<(Vec<PathBuf>, u32, PathBuf)>,
    }

    impl VideoWriter for RecordingWriter {
        fn write_video(&mut self, frames: &[PathBuf], fps: u32, output: &Path) -> Result<()> {
            self.calls
                .push((frames.to_vec(), fps, output.to_path_buf()));
            Ok(())
        }
    }

    fn args(input: &Path, timezone: &str) -> CreateArgs {
        CreateArgs {
            input: input.to_path_buf(),
            output: input.join("timelapse.mp4"),
            timezone: timezone.to_string(),
            start: 0.0,
            end: f64::INFINITY,
            duration: 5.0,
            fps: 24,
            codec: None,
        }
    }

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"").unwrap();
        }
    }

    #[test]
    fn unknown_timezone_stops_before_scanning() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RecordingWriter::default();

        let err = run_create(&args(&dir.path().join("missing"), "Nowhere/City"), &mut writer)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::UnknownTimezone(_))
        ));
        assert!(writer.calls.is_empty());
    }

    #[test]
    fn zero_frames_per_image_stops_before_scanning() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RecordingWriter::default();
        let mut create = args(&dir.path().join("missing"), "UTC");
        create.duration = 0.001;
        create.fps = 1;

        let err = run_create(&create, &mut writer).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::FramesPerImageTooSmall { .. })
        ));
        assert!(writer.calls.is_empty());
    }

    #[test]
    fn missing_input_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RecordingWriter::default();

        assert!(run_create(&args(&dir.path().join("missing"), "UTC"), &mut writer).is_err());
        assert!(writer.calls.is_empty());
    }

    #[test]
    fn empty_selection_skips_encoding() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["notes.txt", "holiday.png"]);
        let mut writer = RecordingWriter::default();

        run_create(&args(dir.path(), "UTC"), &mut writer).unwrap();

        assert!(writer.calls.is_empty());
    }

    #[test]
    fn only_gap_timestamps_finish_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &["2024-03-10_02-00-00.000.png", "2024-03-10_02-59-59.999.jpg"],
        );
        let mut writer = RecordingWriter::default();

        run_create(&args(dir.path(), "America/Chicago"), &mut writer).unwrap();

        assert!(writer.calls.is_empty());
    }

    #[test]
    fn sorted_and_expanded_frames_reach_the_writer() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &[
                "2024-01-01_10-00-00.000.png",
                "2024-01-01_09-00-00.000.png",
                "2024-01-01_08-00-00.000.txt",
            ],
        );
        let mut writer = RecordingWriter::default();
        let mut create = args(dir.path(), "America/Chicago");
        create.duration = 1.0;
        create.fps = 2;

        run_create(&create, &mut writer).unwrap();

        let early = dir.path().join("2024-01-01_09-00-00.000.png");
        let late = dir.path().join("2024-01-01_10-00-00.000.png");
        assert_eq!(writer.calls.len(), 1);
        let (frames, fps, output) = &writer.calls[0];
        assert_eq!(frames, &[early.clone(), early, late.clone(), late]);
        assert_eq!(*fps, 2);
        assert_eq!(output, &dir.path().join("timelapse.mp4"));
    }

    #[test]
    fn window_limits_what_is_encoded() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &["2024-01-01_00-00-00.000.png", "2024-01-02_00-00-00.000.png"],
        );
        let mut writer = RecordingWriter::default();
        let mut create = args(dir.path(), "UTC");
        create.end = 1_704_067_200.0;
        create.duration = 0.5;
        create.fps = 2;

        run_create(&create, &mut writer).unwrap();

        let (frames, _, _) = &writer.calls[0];
        assert_eq!(frames, &[dir.path().join("2024-01-01_00-00-00.000.png")]);
    }
}
