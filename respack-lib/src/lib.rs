use std::path::{Component, Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One file to pick up: `src` is relative to its folder, `dst` is the name it
/// gets inside the archive.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RenameRecord {
    pub src: String,
    pub dst: String,
}

/// Folder name -> rename records, in document order.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct PackConfig {
    pub folders: IndexMap<String, Vec<RenameRecord>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid JSON configuration")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML configuration")]
    Yaml(#[from] serde_yaml::Error),

    #[error("folder {folder:?}: {reason}")]
    InvalidFolder { folder: String, reason: &'static str },

    #[error("folder {folder:?}, record #{index}: {reason}")]
    InvalidRecord {
        folder: String,
        index: usize,
        reason: &'static str,
    },
}

impl PackConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: PackConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: PackConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects names that would resolve outside the input folder or outside
    /// the staging directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (folder, records) in &self.folders {
            if !stays_inside(folder) {
                return Err(ConfigError::InvalidFolder {
                    folder: folder.clone(),
                    reason: "must be a relative path inside the input directory",
                });
            }

            for (index, record) in records.iter().enumerate() {
                let invalid = |reason| ConfigError::InvalidRecord {
                    folder: folder.clone(),
                    index,
                    reason,
                };
                if !is_relative_inside(&record.src) {
                    return Err(invalid("`src` must be a relative path inside its folder"));
                }
                if !is_bare_file_name(&record.dst) {
                    return Err(invalid("`dst` must be a plain file name"));
                }
            }
        }
        Ok(())
    }

    /// Total number of rename records across all folders.
    pub fn record_count(&self) -> usize {
        self.folders.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

/// Empty and `.`-only paths stay inside too; they name the root itself.
fn stays_inside(s: &str) -> bool {
    Path::new(s)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn is_relative_inside(s: &str) -> bool {
    stays_inside(s)
        && Path::new(s)
            .components()
            .any(|c| matches!(c, Component::Normal(_)))
}

fn is_bare_file_name(s: &str) -> bool {
    let mut components = Path::new(s).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == s
    )
}
