//! One pipeline invocation, end to end.

use crate::annotate::{Annotator, HttpImageFetcher, ImageFetcher, VisionAnnotator};
use crate::config::Config;
use crate::error::{PipelineResult, Result};
use crate::http::{build_client, GoogleAuth};
use crate::market;
use crate::source::{BingClient, ImageSource};
use crate::store::{StoreFactory, WallpaperStore};
use crate::translate::{GoogleTranslator, Translator};
use crate::types::UpdateReport;

use super::discovery::discover;
use super::enrich::Enricher;
use super::reconcile::{decide, Decision};

/// External collaborators the pipeline talks to.
pub struct Services {
    pub source: Box<dyn ImageSource>,
    pub store: Box<dyn WallpaperStore>,
    pub translator: Box<dyn Translator>,
    pub annotator: Box<dyn Annotator>,
    pub fetcher: Box<dyn ImageFetcher>,
}

/// Options for controlling an invocation.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Host prefixed to every relative URL-base
    pub base_url: String,
    /// Maximum dominant colors kept per wallpaper
    pub max_colors: usize,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            base_url: "https://www.bing.com".to_string(),
            max_colors: 4,
        }
    }
}

/// Discovers, reconciles, enriches and persists wallpapers.
///
/// Built once; every `update()` call is an independent invocation with its
/// own dedup map.
pub struct Updater {
    source: Box<dyn ImageSource>,
    store: Box<dyn WallpaperStore>,
    enricher: Enricher,
    options: UpdateOptions,
}

impl Updater {
    pub fn new(services: Services, options: UpdateOptions) -> Self {
        let enricher = Enricher::new(
            services.translator,
            services.annotator,
            services.fetcher,
            options.max_colors,
        );
        Self {
            source: services.source,
            store: services.store,
            enricher,
            options,
        }
    }

    /// Wire up the production clients described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_client(config)?;
        let auth = GoogleAuth::from_config(&config.google);
        if !auth.is_configured() {
            tracing::warn!(
                "No Google credentials configured. Set GOOGLE_API_KEY or GOOGLE_ACCESS_TOKEN."
            );
        }

        let store = StoreFactory::create(
            &config.store,
            config.store_file_path(),
            auth.clone(),
            client.clone(),
        )?;
        tracing::debug!("Using {} store", store.name());

        let services = Services {
            source: Box::new(BingClient::new(
                &config.source.base_url,
                config.source.image_count,
                client.clone(),
            )),
            store,
            translator: Box::new(GoogleTranslator::new(
                &config.google.translate_endpoint,
                auth.clone(),
                client.clone(),
            )),
            annotator: Box::new(VisionAnnotator::new(
                &config.google.vision_endpoint,
                config.limits.max_labels,
                config.limits.max_colors as u32,
                auth,
                client.clone(),
            )),
            fetcher: Box::new(HttpImageFetcher::new(client)),
        };

        Ok(Self::new(
            services,
            UpdateOptions {
                base_url: config.source.base_url.clone(),
                max_colors: config.limits.max_colors,
            },
        ))
    }

    /// Run one invocation.
    ///
    /// The first error aborts the run. Writes committed before it stay in
    /// the store.
    pub async fn update(&self) -> PipelineResult<UpdateReport> {
        let mut report = UpdateReport::default();
        let start = std::time::Instant::now();

        match self.run(&mut report).await {
            Ok(()) => {
                tracing::info!(
                    "{} images updated in {:?}: {}",
                    report.updated().len(),
                    start.elapsed(),
                    report.updated().join(", ")
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!(
                    "Update aborted after {} writes ({}): {}",
                    report.updated().len(),
                    report.updated().join(", "),
                    e
                );
                Err(e)
            }
        }
    }

    async fn run(&self, report: &mut UpdateReport) -> PipelineResult<()> {
        let markets = market::discovery_order();
        let candidates = discover(self.source.as_ref(), &markets, &self.options.base_url).await?;
        report.discovered = candidates.len();
        tracing::info!("{} images found", candidates.len());

        for (id, candidate) in candidates {
            let existing = self.store.get(&id).await?;

            match decide(existing, candidate) {
                Decision::Create(mut wallpaper) => {
                    tracing::info!("New image {} from {}", id, wallpaper.market);
                    self.enricher.enrich(&mut wallpaper).await?;
                    self.store.upsert(&wallpaper).await?;
                    report.record_created(&id);
                }
                Decision::Patch(wallpaper) => {
                    tracing::info!("Adding URL-base to {}", id);
                    self.store.upsert(&wallpaper).await?;
                    report.record_patched(&id);
                }
                Decision::Upgrade(wallpaper) => {
                    tracing::info!("Upgrading {} to {}", id, wallpaper.market);
                    self.store.upsert(&wallpaper).await?;
                    report.record_upgraded(&id);
                }
                Decision::Skip => {
                    tracing::trace!("Skipping {}", id);
                    report.skipped += 1;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::pipeline::testing::{
        raw, MemoryStore, MockAnnotator, MockFetcher, MockSource, MockTranslator,
    };
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn updater(source: MockSource, store: MemoryStore, translator: MockTranslator) -> Updater {
        let annotator = MockAnnotator::sample();
        updater_with(source, store, translator, annotator, MockFetcher::ok())
    }

    fn updater_with(
        source: MockSource,
        store: MemoryStore,
        translator: MockTranslator,
        annotator: MockAnnotator,
        fetcher: MockFetcher,
    ) -> Updater {
        Updater::new(
            Services {
                source: Box::new(source),
                store: Box::new(store),
                translator: Box::new(translator),
                annotator: Box::new(annotator),
                fetcher: Box::new(fetcher),
            },
            UpdateOptions::default(),
        )
    }

    fn whale_source() -> MockSource {
        MockSource::new()
            .with(
                "en-US",
                vec![raw("MauiWhale", "EN-US", "Humpback whales (© Flip Nicklin)", true)],
            )
            .with(
                "fr-FR",
                vec![
                    raw("MauiWhale", "FR-FR", "Baleines à bosse (© Flip Nicklin)", true),
                    raw("Chambord", "FR-FR", "Château de Chambord (© Jean Dupont)", true),
                ],
            )
    }

    #[tokio::test]
    async fn test_new_images_are_enriched_and_stored() {
        let store = MemoryStore::new();
        let translator = MockTranslator::returning("Chambord Castle");
        let updater = updater(whale_source(), store.clone(), translator);

        let report = updater.update().await.unwrap();
        assert_eq!(report.discovered, 2);
        assert_eq!(report.created, vec!["MauiWhale", "Chambord"]);
        assert_eq!(report.updated(), ["MauiWhale", "Chambord"]);

        let whale = store.document("MauiWhale").unwrap();
        assert_eq!(whale["market"], "en-US");
        assert_eq!(whale["title"], "Humpback whales");
        assert_eq!(whale["date"], 20230219);
        assert_eq!(whale["tagsOrdered"], json!(["whale", "water", "marine-mammal"]));
        assert_eq!(whale["colors"].as_array().unwrap().len(), 4);

        let castle = store.document("Chambord").unwrap();
        assert_eq!(castle["title"], "Chambord Castle");
        assert_eq!(castle["fullDesc"], "Château de Chambord (© Jean Dupont)");
    }

    #[tokio::test]
    async fn test_queries_every_market_english_first() {
        let source = MockSource::new();
        let calls = source.calls_handle();
        let updater = updater(source, MemoryStore::new(), MockTranslator::returning("x"));

        updater.update().await.unwrap();
        assert_eq!(*calls.lock().unwrap(), market::discovery_order());
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let store = MemoryStore::new();
        let updater = updater(whale_source(), store.clone(), MockTranslator::returning("x"));

        updater.update().await.unwrap();
        let writes = store.upsert_count();
        assert_eq!(writes, 2);

        let report = updater.update().await.unwrap();
        assert_eq!(store.upsert_count(), writes);
        assert!(report.updated().is_empty());
        assert_eq!(report.skipped, 2);
    }

    #[tokio::test]
    async fn test_translation_only_for_non_english_markets() {
        let translator = MockTranslator::returning("Chambord Castle");
        let calls = translator.call_count_handle();
        let updater = updater(whale_source(), MemoryStore::new(), translator);

        updater.update().await.unwrap();
        // MauiWhale is first seen under en-US; only Chambord is translated.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_translation_keeps_title() {
        let store = MemoryStore::new();
        let updater = updater(whale_source(), store.clone(), MockTranslator::returning(""));

        updater.update().await.unwrap();
        assert_eq!(store.document("Chambord").unwrap()["title"], "Château de Chambord");
    }

    #[tokio::test]
    async fn test_legacy_record_gets_url_base_patch() {
        let store = MemoryStore::new();
        store.seed(
            "MauiWhale",
            json!({
                "id": "MauiWhale",
                "title": "Humpback whales",
                "date": 20200101,
                "market": "en-GB",
                "tags": {"whale": 0.98}
            }),
        );
        let source = MockSource::new().with(
            "en-US",
            vec![raw("MauiWhale", "EN-US", "Humpback whales (© Flip Nicklin)", true)],
        );
        let annotator = MockAnnotator::sample();
        let annotations = annotator.call_count_handle();
        let updater = updater_with(
            source,
            store.clone(),
            MockTranslator::returning("x"),
            annotator,
            MockFetcher::ok(),
        );

        let report = updater.update().await.unwrap();
        assert_eq!(report.patched, vec!["MauiWhale"]);
        assert_eq!(annotations.load(Ordering::SeqCst), 0);

        let doc = store.document("MauiWhale").unwrap();
        assert_eq!(
            doc["urlBase"],
            "https://www.bing.com/th?id=OHR.MauiWhale_EN-US1234567890"
        );
        assert_eq!(doc["date"], 20200101);
        assert_eq!(doc["market"], "en-GB");
        assert_eq!(doc["tags"]["whale"], 0.98);
    }

    #[tokio::test]
    async fn test_english_version_upgrades_non_english_record() {
        let store = MemoryStore::new();
        store.seed(
            "MauiWhale",
            json!({
                "id": "MauiWhale",
                "title": "Baleines à bosse",
                "date": 20200101,
                "market": "fr-FR",
                "urlBase": "https://www.bing.com/th?id=OHR.MauiWhale_FR-FR1234567890",
                "tags": {"whale": 0.98},
                "tagsOrdered": ["whale"],
                "colors": ["#102040"]
            }),
        );
        let translator = MockTranslator::returning("x");
        let translations = translator.call_count_handle();
        let updater = updater(whale_source(), store.clone(), translator);

        let report = updater.update().await.unwrap();
        assert_eq!(report.upgraded, vec!["MauiWhale"]);

        let doc = store.document("MauiWhale").unwrap();
        assert_eq!(doc["market"], "en-US");
        assert_eq!(doc["title"], "Humpback whales");
        assert_eq!(doc["date"], 20200101);
        assert_eq!(
            doc["urlBase"],
            "https://www.bing.com/th?id=OHR.MauiWhale_EN-US1234567890"
        );
        assert_eq!(doc["tags"]["whale"], 0.98);
        assert_eq!(doc["colors"], json!(["#102040"]));
        // Only the new Chambord record goes through translation.
        assert_eq!(translations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_discovery_failure_writes_nothing() {
        let store = MemoryStore::new();
        let source = whale_source().failing("ja-JP");
        let updater = updater(source, store.clone(), MockTranslator::returning("x"));

        let err = updater.update().await.unwrap_err();
        assert!(matches!(err, PipelineError::Discovery { .. }));
        assert_eq!(store.upsert_count(), 0);
    }

    #[tokio::test]
    async fn test_translation_failure_keeps_earlier_writes() {
        let store = MemoryStore::new();
        let updater = updater(whale_source(), store.clone(), MockTranslator::failing());

        let err = updater.update().await.unwrap_err();
        assert!(matches!(err, PipelineError::Translation { .. }));
        // MauiWhale (English) was written before Chambord failed.
        assert!(store.document("MauiWhale").is_some());
        assert!(store.document("Chambord").is_none());
    }

    #[tokio::test]
    async fn test_annotation_failure_aborts() {
        let store = MemoryStore::new();
        let updater = updater_with(
            whale_source(),
            store.clone(),
            MockTranslator::returning("x"),
            MockAnnotator::failing(),
            MockFetcher::ok(),
        );

        let err = updater.update().await.unwrap_err();
        assert!(matches!(err, PipelineError::Annotation { .. }));
        assert_eq!(store.upsert_count(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_aborts() {
        let updater = updater(
            whale_source(),
            MemoryStore::failing_writes(),
            MockTranslator::returning("x"),
        );

        let err = updater.update().await.unwrap_err();
        assert!(matches!(err, PipelineError::Store { status_code: Some(403), .. }));
    }
}
