use std::{fs, path::Path};

use respack_lib::{ConfigError, PackConfig};
use tracing::debug;

use crate::error::PackError;

/// Reads the packing configuration from `config`, which is either a path to a
/// YAML/JSON file or a literal JSON document.
///
/// The path interpretation is tried first. If it fails for any reason (no such
/// file, unreadable, malformed) the whole string is parsed as JSON instead, and
/// only when that also fails is an error returned, carrying both causes.
pub fn load_config(config: &str) -> Result<PackConfig, PackError> {
    let file_error = match read_config_file(config) {
        Ok(cfg) => {
            debug!(config, "configuration loaded from file");
            return Ok(cfg);
        }
        Err(e) => e,
    };

    debug!(error = %file_error, "not a configuration file, parsing as literal JSON");
    PackConfig::from_json_str(config).map_err(|literal_error| PackError::Config {
        file_error,
        literal_error,
    })
}

/// Parses a configuration file by extension: `.yaml`/`.yml` as YAML, anything
/// else as JSON.
fn read_config_file(path: &str) -> Result<PackConfig, String> {
    let path = std::path::absolute(path).map_err(|e| e.to_string())?;
    let content = fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    let parsed = if is_yaml(&path) {
        PackConfig::from_yaml_str(&content)
    } else {
        PackConfig::from_json_str(&content)
    };
    parsed.map_err(|e| format!("{}: {}", path.display(), error_chain(&e)))
}

/// `e` followed by each of its sources, `: `-separated.
fn error_chain(e: &ConfigError) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
