//! The `dailywall update` command: one ingestion pass.

use clap::Args;
use dailywall_core::config::StoreBackend;
use dailywall_core::{Config, UpdateReport, Updater};
use std::path::PathBuf;

/// Arguments for the `update` command.
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Use a local JSON file as the store instead of the configured backend
    #[arg(long, value_name = "PATH")]
    pub store_file: Option<PathBuf>,
}

/// Apply command-line overrides on top of the loaded config.
fn apply_overrides(mut config: Config, args: &UpdateArgs) -> Config {
    if let Some(path) = &args.store_file {
        config.store.backend = StoreBackend::File;
        config.store.file_path = path.display().to_string();
    }
    config
}

fn print_summary(report: &UpdateReport) {
    println!(
        "{} discovered, {} created, {} patched, {} upgraded, {} skipped",
        report.discovered,
        report.created.len(),
        report.patched.len(),
        report.upgraded.len(),
        report.skipped
    );
    for id in report.updated() {
        println!("  {id}");
    }
}

/// Execute the update command.
///
/// Ctrl-C drops the in-flight invocation; writes already committed stay.
pub async fn execute(args: UpdateArgs, config: Config) -> anyhow::Result<()> {
    let config = apply_overrides(config, &args);
    let updater = Updater::from_config(&config)?;

    tokio::select! {
        result = updater.update() => {
            let report = result?;
            print_summary(&report);
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, abandoning the current update");
            anyhow::bail!("update interrupted");
        }
    }
}
