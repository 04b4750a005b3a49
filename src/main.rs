//! Firecrawl Explorer main entry point
//!
//! This is the command-line interface for the interactive explorer.

use anyhow::Context;
use clap::Parser;
use firecrawl_explorer::config::{load_config_with_hash, validate, Config};
use firecrawl_explorer::session::{Session, TerminalPrompt};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Firecrawl Explorer: a terminal client for a Firecrawl instance
///
/// Scrape single pages, crawl whole sites, map their links, and keep the
/// results in a local export archive with descriptions and tags.
#[derive(Parser, Debug)]
#[command(name = "firecrawl-explorer")]
#[command(version)]
#[command(about = "Interactive terminal client for Firecrawl", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (settings can be written back to it)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Firecrawl API base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Firecrawl API key
    #[arg(long, env = "FIRECRAWL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Directory holding the export archive
    #[arg(long, value_name = "DIR")]
    archive_root: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let mut session = Session::new(config, TerminalPrompt::new())
        .context("Failed to start session")?;
    if let Some(path) = cli.config {
        session = session.with_config_path(path);
    }

    session.run().await;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr and stay at warn by default so they do not interleave
/// with the interactive menus.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("firecrawl_explorer=warn,warn"),
            1 => EnvFilter::new("firecrawl_explorer=info,warn"),
            2 => EnvFilter::new("firecrawl_explorer=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Layers defaults, the optional config file, and command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) if path.exists() => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        Some(path) => {
            tracing::info!(
                "{} does not exist yet; starting from defaults",
                path.display()
            );
            Config::default()
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(key) = &cli.api_key {
        config.api.api_key = Some(key.clone());
    }
    if let Some(root) = &cli.archive_root {
        config.archive.root = root.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}
