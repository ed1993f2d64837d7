use std::io;
use std::path::PathBuf;

use respack_lib::ConfigError;

/// Fatal errors of a packing run. Missing folders and source files are not
/// errors; they are skipped during staging.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error(
        "configuration is neither a readable file ({file_error}) nor a literal JSON document"
    )]
    Config {
        file_error: String,
        #[source]
        literal_error: ConfigError,
    },

    #[error("Unexisting input directory: {0}")]
    MissingInput(PathBuf),

    #[error("Unexisting output directory: {0}")]
    MissingOutputDir(PathBuf),

    #[error("could not create a unique staging directory in {root} after {attempts} attempts")]
    StagingExhausted { root: PathBuf, attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("zip error: {0}")]
    Archive(#[from] async_zip::error::ZipError),
}
