//! Subscriber setup for the CLI.
//!
//! Everything is written to stderr; stdout carries only command output.
//! Precedence for the level: `RUST_LOG`, then `--verbose`, then
//! `[logging] level`.

use dailywall_core::config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Level used when `RUST_LOG` is not set.
///
/// `--verbose` raises the configured level to at least `debug`; it never
/// lowers `trace`. Unknown names fall back to `info`.
fn default_level(configured: &str, verbose: bool) -> &'static str {
    let configured = configured.trim().to_ascii_lowercase();
    let level = LEVELS
        .iter()
        .copied()
        .find(|l| *l == configured)
        .unwrap_or("info");
    if verbose && level != "trace" {
        "debug"
    } else {
        level
    }
}

fn wants_json(config: &LoggingConfig, json_logs: bool) -> bool {
    json_logs || config.format.eq_ignore_ascii_case("json")
}

/// Install the global subscriber from the `[logging]` section and CLI flags.
pub fn init_from_config(config: &dailywall_core::Config, verbose: bool, json_logs: bool) {
    let level = default_level(&config.logging.level, verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let output: Box<dyn Layer<Registry> + Send + Sync> = if wants_json(&config.logging, json_logs)
    {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(output.with_filter(filter))
        .init();
}
