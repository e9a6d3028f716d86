mod card;
mod config;
mod http_client;
mod listing;
mod page;
mod parser;
mod renderer;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Populate a documentation page's containers with link cards harvested from
/// remote directory listings.
#[derive(Parser, Debug)]
#[command(name = "docshelf", version)]
struct Args {
    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = "docshelf.json")]
    config: PathBuf,

    /// Override the template page path from the config.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Override the output path from the config.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the rendered fragments to stdout instead of writing the page.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    init_logging();

    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("docshelf error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = config::Config::load(&args.config)?;
    if let Some(template) = args.template {
        config.template = template;
    }
    if let Some(output) = args.output {
        config.output = output;
    }

    let summary = renderer::run(&config, args.dry_run).await?;
    tracing::info!(
        sources = summary.sources,
        cards = summary.cards,
        "render complete"
    );
    Ok(())
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,docshelf=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
