use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use respack_tool::{Pipeline, load_config, logging};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generates a compressed file from a list of files", long_about = None)]
pub struct Cli {
    /// Configuration file in JSON or YAML format, or a literal JSON document
    #[arg(short, long, env = "RESPACK_CONFIG")]
    pub config: String,

    /// Input folder path
    #[arg(short, long, env = "RESPACK_INPUT")]
    pub input: PathBuf,

    /// Output file path
    #[arg(short, long, env = "RESPACK_OUTPUT")]
    pub output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    let config = load_config(&cli.config).context("loading configuration")?;
    let pipeline = Pipeline::new(config, &cli.input, &cli.output)?;
    let report = pipeline
        .launch()
        .with_context(|| format!("creating {}", cli.output.display()))?;

    if !report.cleanup_ok {
        warn!(
            dir = %report.staging_dir.display(),
            "staging directory was left behind"
        );
    }
    info!(
        output = %report.output.display(),
        files = report.members.len(),
        skipped = report.skipped,
        "done"
    );
    Ok(())
}
