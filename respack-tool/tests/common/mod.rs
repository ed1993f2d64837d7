#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use async_zip::tokio::read::fs::ZipFileReader;
use respack_tool::RunOptions;
use std::time::Duration;
use tempfile::TempDir;

/// Scratch layout for one run: input tree, output directory, staging root.
pub struct Workspace {
    pub input: TempDir,
    pub out: TempDir,
    pub staging: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            input: TempDir::new().unwrap(),
            out: TempDir::new().unwrap(),
            staging: TempDir::new().unwrap(),
        }
    }

    /// Writes `<input>/<rel>`, creating parent folders.
    pub fn add_input(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.input.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn output(&self) -> PathBuf {
        self.out.path().join("out.zip")
    }

    pub fn options(&self) -> RunOptions {
        RunOptions {
            staging_root: self.staging.path().to_path_buf(),
            cleanup_retry_delay: Duration::ZERO,
            ..RunOptions::default()
        }
    }

    pub fn staging_entries(&self) -> usize {
        fs::read_dir(self.staging.path()).unwrap().count()
    }
}

/// Reads every member of the archive at `path` as (name, content), in archive order.
pub fn read_members(path: &Path) -> Vec<(String, Vec<u8>)> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    rt.block_on(async {
        let reader = ZipFileReader::new(path).await.unwrap();
        let mut members = Vec::new();
        for index in 0..reader.file().entries().len() {
            let name = reader.file().entries()[index]
                .filename()
                .as_str()
                .unwrap()
                .to_string();
            let mut entry = reader.reader_with_entry(index).await.unwrap();
            let mut content = Vec::new();
            entry.read_to_end_checked(&mut content).await.unwrap();
            members.push((name, content));
        }
        members
    })
}

pub fn member_names(path: &Path) -> Vec<String> {
    read_members(path).into_iter().map(|(name, _)| name).collect()
}
