//! Dailywall Core - wallpaper ingestion and reconciliation.
//!
//! Harvests the image-of-the-day feed across regional markets, deduplicates
//! the results, reconciles them against the stored catalog and enriches new
//! wallpapers with translated titles, labels and dominant colors.
//!
//! # Architecture
//!
//! ```text
//! Markets → Discover/Dedup → Reconcile → [skip | patch | upgrade | Enrich] → Upsert
//! ```
//!
//! Every external system sits behind a trait (`ImageSource`,
//! `WallpaperStore`, `Translator`, `Annotator`, `ImageFetcher`), so the
//! pipeline can run against the production Google and Bing clients or
//! against in-memory collaborators.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dailywall_core::{Config, Updater};
//!
//! #[tokio::main]
//! async fn main() -> dailywall_core::Result<()> {
//!     let config = Config::load()?;
//!     let updater = Updater::from_config(&config)?;
//!
//!     let report = updater.update().await?;
//!     println!("Updated: {:?}", report.updated());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod annotate;
pub mod candidate;
pub mod config;
pub mod copyright;
pub mod error;
pub mod http;
pub mod market;
pub mod pipeline;
pub mod source;
pub mod store;
pub mod translate;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, DailywallError, PipelineError, PipelineResult, Result};
pub use pipeline::{Decision, Services, UpdateOptions, Updater};
pub use types::{Annotation, Label, RawImage, Rgb, UpdateReport, Wallpaper};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
