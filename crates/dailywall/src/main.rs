//! Dailywall CLI - harvest daily wallpapers into an enriched catalog.
//!
//! Each `update` discovers the latest images across the English and
//! non-English markets, reconciles them against the stored catalog and
//! enriches brand-new wallpapers before writing them back.
//!
//! # Usage
//!
//! ```bash
//! # Run one ingestion pass against the configured store
//! dailywall update
//!
//! # Run offline against a local JSON store
//! dailywall update --store-file ./wallpapers.json
//!
//! # View configuration
//! dailywall config show
//! ```

use clap::{Parser, Subcommand};
use dailywall_core::Config;
use std::path::PathBuf;

mod cli;
mod logging;

/// Dailywall - harvest daily wallpapers into an enriched catalog.
#[derive(Parser, Debug)]
#[command(name = "dailywall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "DAILYWALL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one ingestion pass: discover, reconcile, enrich, store
    Update(cli::update::UpdateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => match Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `dailywall config path`."
                );
                Config::default()
            }
        },
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Dailywall v{}", dailywall_core::VERSION);

    match cli.command {
        Commands::Update(args) => cli::update::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config, cli.config).await,
    }
}
