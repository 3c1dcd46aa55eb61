use crate::types::consts::TYPE_JSON_SUFFIX;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::warn;
use walkdir::WalkDir;

/// Outcome of one deletion walk.
#[derive(Debug, Default)]
pub struct RemovalReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, io::Error)>,
}

pub fn remove_type_json_files(root: &Path) -> RemovalReport {
    remove_matching(root, TYPE_JSON_SUFFIX, |path| fs::remove_file(path))
}

/// Walks `root` and calls `remove` for every non-directory whose name ends with `suffix`.
///
/// A failed removal is reported and the walk carries on with the next entry.
pub fn remove_matching<F>(root: &Path, suffix: &str, mut remove: F) -> RemovalReport
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let mut report = RemovalReport::default();

    for entry_res in WalkDir::new(root) {
        let entry = match entry_res {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        // `path().is_dir()` follows symlinks, so a link to a directory is never unlinked.
        if entry.path().is_dir() || !entry.file_name().to_string_lossy().ends_with(suffix) {
            continue;
        }

        let path = entry.path();
        match remove(path) {
            Ok(()) => {
                println!("Removed: {}", path.display());
                report.removed.push(path.to_path_buf());
            }
            Err(e) => {
                eprintln!("Error removing {}: {e}", path.display());
                report.failed.push((path.to_path_buf(), e));
            }
        }
    }

    report
}
