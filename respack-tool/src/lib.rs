//! Stages renamed copies of configured files and packs them into one zip.

pub mod config;
pub mod error;
pub mod fs_utils;
pub mod logging;
pub mod naming;
pub mod packaging;
pub mod process;

pub use config::load_config;
pub use error::PackError;
pub use process::{Pipeline, RunOptions, RunReport};
pub use respack_lib::{PackConfig, RenameRecord};
