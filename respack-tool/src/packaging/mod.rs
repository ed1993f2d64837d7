use std::path::{Path, PathBuf};

use tokio::runtime::Builder;
use tracing::info;

use crate::error::PackError;

pub mod zip;

/// Represents a file to include in the ZIP archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name_in_archive: String,
}

/// Sorts `files` by full path and names each entry after its base file name.
pub fn prepare_entries(mut files: Vec<PathBuf>) -> Vec<FileEntry> {
    files.sort();
    files
        .into_iter()
        .map(|path| {
            let name_in_archive = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());
            FileEntry {
                path,
                name_in_archive,
            }
        })
        .collect()
}

/// Writes `files` into a deflate-compressed ZIP at `output`, replacing any
/// existing file, and returns the member names in archive order.
///
/// Runs on its own single-threaded tokio runtime, so it must not be called
/// from inside another runtime.
pub fn create_zip_sync(output: &Path, files: Vec<PathBuf>) -> Result<Vec<String>, PackError> {
    let entries = prepare_entries(files);

    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(zip::write_zip_file(output, &entries))?;

    let members: Vec<String> = entries.into_iter().map(|e| e.name_in_archive).collect();
    info!(
        output = %output.display(),
        count = members.len(),
        members = ?members,
        "archive written"
    );
    Ok(members)
}
