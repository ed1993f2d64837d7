use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::PackError;

/// How many fresh names are tried before giving up on a staging directory.
pub const DEFAULT_ATTEMPTS: u32 = 10;

/// `prefix` followed by a random v4 UUID.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4())
}

/// Creates a new directory under `root` named `prefix + uuid`.
///
/// A name that already exists is replaced by a fresh one, up to `attempts`
/// tries in total. Any other creation failure is returned immediately.
pub fn create_unique_dir(root: &Path, prefix: &str, attempts: u32) -> Result<PathBuf, PackError> {
    create_unique_dir_with(root, attempts, || unique_name(prefix))
}

fn create_unique_dir_with(
    root: &Path,
    attempts: u32,
    mut next_name: impl FnMut() -> String,
) -> Result<PathBuf, PackError> {
    let root = std::path::absolute(root)?;

    for attempt in 1..=attempts {
        let dir = root.join(next_name());
        match fs::create_dir(&dir) {
            Ok(()) => {
                info!(dir = %dir.display(), "staging directory created");
                return Ok(dir);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!(
                    dir = %dir.display(),
                    remaining = attempts - attempt,
                    "staging directory already exists, retrying with a new name"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(PackError::StagingExhausted { root, attempts })
}
