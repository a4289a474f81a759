//! The ingestion pipeline.
//!
//! - **discovery**: query every market and fold results into a dedup map
//! - **reconcile**: decide create / skip / patch / upgrade per candidate
//! - **enrich**: translate, annotate, rank tags, extract colors
//! - **updater**: runs one invocation end to end and persists the results

pub mod discovery;
pub mod enrich;
pub mod reconcile;
pub mod updater;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenient access
pub use discovery::{discover, DedupMap};
pub use enrich::{hex_colors, rank_tags, Enricher};
pub use reconcile::{decide, Decision};
pub use updater::{Services, UpdateOptions, Updater};
