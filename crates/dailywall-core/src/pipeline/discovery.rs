//! Discovery and deduplication across markets.

use indexmap::IndexMap;

use crate::error::PipelineResult;
use crate::source::ImageSource;
use crate::types::Wallpaper;

/// Candidates keyed by identifier, in first-seen order.
pub type DedupMap = IndexMap<String, Wallpaper>;

/// Query `source` once per market, in order, and deduplicate by identifier.
///
/// Only wallpaper-eligible images are kept. When the same identifier shows
/// up under several markets the first one seen wins, so passing English
/// markets first makes English captions authoritative. Any source or parse
/// failure aborts discovery.
pub async fn discover(
    source: &dyn ImageSource,
    markets: &[&str],
    base_url: &str,
) -> PipelineResult<DedupMap> {
    let mut candidates = DedupMap::new();

    for &market in markets {
        let images = source.list(market).await?;
        let listed = images.len();
        let mut added = 0usize;

        for image in images.iter().filter(|i| i.wallpaper) {
            let candidate = Wallpaper::from_raw(image, market, base_url)?;
            if !candidates.contains_key(&candidate.id) {
                candidates.insert(candidate.id.clone(), candidate);
                added += 1;
            }
        }

        tracing::debug!("{market}: {listed} listed, {added} new candidates");
    }

    Ok(candidates)
}
