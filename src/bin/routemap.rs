use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use tracing_subscriber::EnvFilter;

use routemap::site;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a static interactive map site from GPX track logs", long_about = None)]
struct Cli {
    /// Directory containing .gpx track-log files
    #[arg(value_hint = ValueHint::DirPath)]
    input_dir: PathBuf,

    /// Directory to write the generated site into
    #[arg(value_hint = ValueHint::DirPath)]
    output_dir: PathBuf,

    /// Site title shown in the page header
    #[arg(long, default_value = site::DEFAULT_TITLE)]
    title: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let routes = site::build_site(&cli.input_dir, &cli.output_dir, &cli.title)
        .with_context(|| format!("Failed to build site from {}", cli.input_dir.display()))?;

    tracing::info!(
        routes = routes.len(),
        output = %cli.output_dir.display(),
        "Done"
    );
    Ok(())
}
