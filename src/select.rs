use crate::{
    timestamp::{FileStamp, localize, parse_file_name},
    types::{
        config_error::ConfigError,
        image_record::{ImageRecord, TimeWindow},
    },
};
use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use std::{
    fs,
    iter,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Number of consecutive video frames each image is shown for.
pub fn frames_per_image(duration: f64, fps: u32) -> Result<usize, ConfigError> {
    let exact = duration * f64::from(fps);
    let frames = exact.round_ties_even();
    if !frames.is_finite() || frames < 1.0 {
        return Err(ConfigError::FramesPerImageTooSmall { frames: exact });
    }
    Ok(frames as usize)
}

/// Lists regular files directly inside `dir` and selects the time-lapse images among them.
pub fn scan_directory(dir: &Path, tz: &Tz, window: &TimeWindow) -> Result<Vec<ImageRecord>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read input directory: {dir:?}"))?;

    let mut paths = Vec::new();
    for entry_res in entries {
        match entry_res {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() {
                    paths.push(path);
                }
            }
            Err(e) => warn!("Skipping unreadable entry in {dir:?}: {e}"),
        }
    }

    Ok(select_images(paths, tz, window))
}

/// Keeps the timestamp-named images that fall inside `window`, sorted by capture time.
pub fn select_images<I>(paths: I, tz: &Tz, window: &TimeWindow) -> Vec<ImageRecord>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut records: Vec<ImageRecord> = paths
        .into_iter()
        .filter_map(|path| image_record(path, tz, window))
        .collect();
    records.sort();
    records
}

fn image_record(path: PathBuf, tz: &Tz, window: &TimeWindow) -> Option<ImageRecord> {
    let name = path.file_name()?.to_str()?;

    let naive = match parse_file_name(name) {
        FileStamp::Ignored => return None,
        FileStamp::Invalid(e) => {
            warn!("Found a file with an invalid timestamp format: {name} ({e})");
            return None;
        }
        FileStamp::Naive(naive) => naive,
    };

    let Some(local) = localize(&naive, tz) else {
        debug!("Skipping {name}: {naive} does not exist in {tz}");
        return None;
    };

    let timestamp = local.with_timezone(&Utc);
    window
        .contains(&timestamp)
        .then_some(ImageRecord { timestamp, path })
}

/// Repeats every image path `frames_per_image` times, keeping their order.
pub fn expand_frames(records: &[ImageRecord], frames_per_image: usize) -> Vec<PathBuf> {
    records
        .iter()
        .flat_map(|record| iter::repeat_n(record.path.clone(), frames_per_image))
        .collect()
}
