use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use respack_lib::PackConfig;
use tracing::{info, warn};

use crate::{
    error::PackError,
    fs_utils::{CLEANUP_RETRY_DELAY, check_io, remove_once, remove_path_with, stage_files},
    naming::{DEFAULT_ATTEMPTS, create_unique_dir},
    packaging::create_zip_sync,
};

/// Knobs for where and how the staging directory is handled.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory the staging directory is created in.
    pub staging_root: PathBuf,
    pub staging_prefix: String,
    pub staging_attempts: u32,
    pub cleanup_retry_delay: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            staging_root: env::temp_dir(),
            staging_prefix: String::new(),
            staging_attempts: DEFAULT_ATTEMPTS,
            cleanup_retry_delay: CLEANUP_RETRY_DELAY,
        }
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output: PathBuf,
    /// Member names in archive order.
    pub members: Vec<String>,
    /// Records left out because their folder or file was missing or the copy failed.
    pub skipped: usize,
    pub staging_dir: PathBuf,
    /// False when the staging directory could not be removed.
    pub cleanup_ok: bool,
}

/// One packing run: stage the configured files, zip them, clean up.
#[derive(Debug)]
pub struct Pipeline {
    config: PackConfig,
    input: PathBuf,
    output: PathBuf,
    options: RunOptions,
}

impl Pipeline {
    /// Validates `input` and the parent of `output` up front; nothing is
    /// created when either is missing.
    pub fn new(
        config: PackConfig,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Result<Self, PackError> {
        let input = input.into();
        let output = output.into();
        check_io(&input, &output)?;

        Ok(Self {
            config,
            input,
            output,
            options: RunOptions::default(),
        })
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the whole pipeline. The staging directory is removed even when
    /// archiving fails; failing to remove it only marks the report.
    pub fn launch(&self) -> Result<RunReport, PackError> {
        self.launch_with(remove_once)
    }

    fn launch_with(
        &self,
        remove: impl FnMut(&Path) -> io::Result<Option<PathBuf>>,
    ) -> Result<RunReport, PackError> {
        let staging_dir = create_unique_dir(
            &self.options.staging_root,
            &self.options.staging_prefix,
            self.options.staging_attempts,
        )?;

        let packed = self.stage_and_pack(&staging_dir);

        let removed = remove_path_with(&staging_dir, self.options.cleanup_retry_delay, remove);
        let cleanup_ok = match removed {
            Ok(_) => {
                info!(dir = %staging_dir.display(), "removed staging directory");
                true
            }
            Err(e) => {
                warn!(dir = %staging_dir.display(), error = %e, "could not remove staging directory");
                false
            }
        };

        let (members, skipped) = packed?;
        Ok(RunReport {
            output: self.output.clone(),
            members,
            skipped,
            staging_dir,
            cleanup_ok,
        })
    }

    fn stage_and_pack(&self, staging_dir: &Path) -> Result<(Vec<String>, usize), PackError> {
        let staged = stage_files(&self.config, &self.input, staging_dir);
        if staged.skipped > 0 {
            info!(
                skipped = staged.skipped,
                total = self.config.record_count(),
                "some configured files were skipped"
            );
        }

        let members = create_zip_sync(&self.output, staged.files)?;
        Ok((members, staged.skipped))
    }
}
