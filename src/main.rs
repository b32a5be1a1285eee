mod config;
mod render;
mod viewer;

use std::{fs, path::Path, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "marksearch")]
#[command(about = "Search a document interactively", long_about = None)]
#[command(version)]
struct Cli {
    /// Document to open
    path: std::path::PathBuf,

    /// Query to start with
    #[arg(short, long)]
    query: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::AppConfig::load_or_create();
    let text = read_document(&cli.path)?;

    viewer::run(&cli.path, text, cli.query.unwrap_or_default(), app_config)
}

fn read_document(path: &Path) -> Result<Arc<str>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = marksearch_search::decode_document(&path.display().to_string(), bytes);
    Ok(Arc::from(text))
}
