//! Enrichment of brand-new wallpapers.
//!
//! Translation for non-English titles, then label and dominant-color
//! annotation of the downloaded image. Every step is fatal on failure; an
//! empty translation is not a failure and keeps the original title.

use indexmap::IndexMap;

use crate::annotate::{Annotator, ImageFetcher};
use crate::error::PipelineResult;
use crate::market;
use crate::translate::{Translator, TARGET_LANGUAGE};
use crate::types::{Annotation, Rgb, Wallpaper};

/// Tag names by descending score.
///
/// The sort is stable, so equal scores keep their insertion order. Spaces
/// become hyphens.
pub fn rank_tags(tags: &IndexMap<String, f64>) -> Vec<String> {
    let mut ranked: Vec<(&String, f64)> =
        tags.iter().map(|(name, score)| (name, *score)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .map(|(name, _)| name.replace(' ', "-"))
        .collect()
}

/// The first `max` colors as uppercase `#RRGGBB`, in service order.
pub fn hex_colors(colors: &[Rgb], max: usize) -> Vec<String> {
    colors.iter().take(max).map(|c| c.to_hex()).collect()
}

/// Fill tags, ranked tags and colors from an annotation.
pub fn apply_annotation(wallpaper: &mut Wallpaper, annotation: &Annotation, max_colors: usize) {
    for label in &annotation.labels {
        wallpaper
            .tags
            .insert(label.description.to_lowercase(), label.score);
    }
    wallpaper.tags_ordered = rank_tags(&wallpaper.tags);
    wallpaper
        .colors
        .extend(hex_colors(&annotation.colors, max_colors));
}

/// Runs translation and annotation against injected services.
pub struct Enricher {
    translator: Box<dyn Translator>,
    annotator: Box<dyn Annotator>,
    fetcher: Box<dyn ImageFetcher>,
    max_colors: usize,
}

impl Enricher {
    pub fn new(
        translator: Box<dyn Translator>,
        annotator: Box<dyn Annotator>,
        fetcher: Box<dyn ImageFetcher>,
        max_colors: usize,
    ) -> Self {
        Self {
            translator,
            annotator,
            fetcher,
            max_colors,
        }
    }

    /// Enrich a new wallpaper in place.
    pub async fn enrich(&self, wallpaper: &mut Wallpaper) -> PipelineResult<()> {
        if market::is_non_english(&wallpaper.market) {
            let translated = self
                .translator
                .translate(&wallpaper.title, TARGET_LANGUAGE)
                .await?;
            if translated.is_empty() {
                tracing::warn!(
                    "Empty translation for {}, keeping original title",
                    wallpaper.id
                );
            } else {
                tracing::debug!(
                    "Translated {}: {:?} -> {:?}",
                    wallpaper.id,
                    wallpaper.title,
                    translated
                );
                wallpaper.title = translated;
            }
        }

        let image = self.fetcher.fetch(&wallpaper.image_url()).await?;
        let annotation = self.annotator.annotate(&image).await?;
        apply_annotation(wallpaper, &annotation, self.max_colors);

        tracing::debug!(
            "Annotated {}: {} tags, {} colors",
            wallpaper.id,
            wallpaper.tags.len(),
            wallpaper.colors.len()
        );
        Ok(())
    }
}
