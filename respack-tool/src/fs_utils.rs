use std::{
    fs, io, thread,
    path::{Path, PathBuf},
    time::Duration,
};

use respack_lib::PackConfig;
use tracing::{debug, warn};

use crate::error::PackError;

/// Pause before the second removal attempt, letting the file system settle.
pub const CLEANUP_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Files copied into the staging directory, in configuration order.
#[derive(Debug, Default)]
pub struct StagedFiles {
    pub files: Vec<PathBuf>,
    pub skipped: usize,
}

/// Checks the input directory and the output's parent directory before
/// anything is created.
pub fn check_io(input: &Path, output: &Path) -> Result<(), PackError> {
    if !input.is_dir() {
        return Err(PackError::MissingInput(input.to_path_buf()));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(PackError::MissingOutputDir(parent.to_path_buf()));
        }
    }

    Ok(())
}

/// Copies every configured `<input>/<folder>/<src>` into `staging` as `dst`.
///
/// Folders and source files missing on disk are skipped, as are copies that
/// fail; each skipped record is counted. A `dst` seen twice is staged once,
/// holding the last copy.
pub fn stage_files(config: &PackConfig, input: &Path, staging: &Path) -> StagedFiles {
    let mut staged = StagedFiles::default();

    for (folder, records) in &config.folders {
        let folder_path = input.join(folder);
        if !folder_path.is_dir() {
            debug!(folder = %folder_path.display(), "folder not found, skipping");
            staged.skipped += records.len();
            continue;
        }

        for record in records {
            let src = folder_path.join(&record.src);
            if !src.is_file() {
                debug!(src = %src.display(), "source file not found, skipping");
                staged.skipped += 1;
                continue;
            }

            let dst = staging.join(&record.dst);
            if let Err(e) = fs::copy(&src, &dst) {
                warn!(src = %src.display(), dst = %dst.display(), error = %e, "copy failed, skipping");
                staged.skipped += 1;
                continue;
            }

            if staged.files.contains(&dst) {
                warn!(dst = %record.dst, "destination name used twice, keeping the last copy");
            } else {
                staged.files.push(dst);
            }
        }
    }

    staged
}

/// Removes a file or a directory tree.
///
/// Returns `Ok(None)` when there is nothing at `target`. If removal fails, it
/// is retried once after `retry_delay`; the second error is returned.
pub fn remove_path(target: &Path, retry_delay: Duration) -> io::Result<Option<PathBuf>> {
    remove_path_with(target, retry_delay, remove_once)
}

pub(crate) fn remove_path_with(
    target: &Path,
    retry_delay: Duration,
    mut remove: impl FnMut(&Path) -> io::Result<Option<PathBuf>>,
) -> io::Result<Option<PathBuf>> {
    match remove(target) {
        Ok(removed) => Ok(removed),
        Err(e) => {
            warn!(path = %target.display(), error = %e, "removal failed, retrying");
            thread::sleep(retry_delay);
            remove(target)
        }
    }
}

pub(crate) fn remove_once(target: &Path) -> io::Result<Option<PathBuf>> {
    let meta = match fs::symlink_metadata(target) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    if meta.is_dir() {
        fs::remove_dir_all(target)?;
    } else {
        fs::remove_file(target)?;
    }
    Ok(Some(target.to_path_buf()))
}
