//! In-memory collaborators for pipeline tests.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::annotate::{Annotator, ImageFetcher};
use crate::error::{PipelineError, PipelineResult};
use crate::source::ImageSource;
use crate::store::{decode_record, merge_fields, write_fields, WallpaperStore};
use crate::translate::Translator;
use crate::types::{Annotation, Label, RawImage, Rgb, Wallpaper};

/// A feed image for `name` as listed under the upper-case `locale`.
pub(crate) fn raw(name: &str, locale: &str, caption: &str, wallpaper: bool) -> RawImage {
    RawImage {
        copyright: caption.to_string(),
        start_date: "20230219".to_string(),
        url_base: format!("/th?id=OHR.{name}_{locale}1234567890"),
        wallpaper,
    }
}

/// Image source backed by per-market fixtures.
#[derive(Default)]
pub(crate) struct MockSource {
    listings: HashMap<String, Vec<RawImage>>,
    failing: HashSet<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, market: &str, images: Vec<RawImage>) -> Self {
        self.listings.insert(market.to_string(), images);
        self
    }

    pub(crate) fn failing(mut self, market: &str) -> Self {
        self.failing.insert(market.to_string());
        self
    }

    pub(crate) fn calls_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ImageSource for MockSource {
    async fn list(&self, market: &str) -> PipelineResult<Vec<RawImage>> {
        self.calls.lock().unwrap().push(market.to_string());
        if self.failing.contains(market) {
            return Err(PipelineError::Discovery {
                market: market.to_string(),
                message: "HTTP 503 Service Unavailable".to_string(),
                status_code: Some(503),
            });
        }
        Ok(self.listings.get(market).cloned().unwrap_or_default())
    }
}

/// Merge-writing store held in memory. Clones share the same documents.
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    documents: Arc<Mutex<HashMap<String, Map<String, Value>>>>,
    upserts: Arc<AtomicU32>,
    fail_writes: bool,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Store a raw document, bypassing the upsert counter.
    pub(crate) fn seed(&self, id: &str, document: Value) {
        let fields = match document {
            Value::Object(fields) => fields,
            other => panic!("seed document must be an object, got {other}"),
        };
        self.documents
            .lock()
            .unwrap()
            .insert(id.to_string(), fields);
    }

    pub(crate) fn document(&self, id: &str) -> Option<Map<String, Value>> {
        self.documents.lock().unwrap().get(id).cloned()
    }

    pub(crate) fn upsert_count(&self) -> u32 {
        self.upserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WallpaperStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, id: &str) -> PipelineResult<Option<Wallpaper>> {
        let document = self.documents.lock().unwrap().get(id).cloned();
        document
            .map(|fields| decode_record(id, Value::Object(fields)))
            .transpose()
    }

    async fn upsert(&self, wallpaper: &Wallpaper) -> PipelineResult<()> {
        if self.fail_writes {
            return Err(PipelineError::Store {
                message: "permission denied".to_string(),
                status_code: Some(403),
            });
        }
        let fields = write_fields(wallpaper)?;
        let mut documents = self.documents.lock().unwrap();
        merge_fields(documents.entry(wallpaper.id.clone()).or_default(), fields);
        self.upserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Translator returning a fixed string, or failing.
pub(crate) struct MockTranslator {
    result: Option<String>,
    call_count: Arc<AtomicU32>,
}

impl MockTranslator {
    pub(crate) fn returning(text: &str) -> Self {
        Self {
            result: Some(text.to_string()),
            call_count: Arc::new(AtomicU32::new(0)),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            result: None,
            call_count: Arc::new(AtomicU32::new(0)),
        }
    }

    pub(crate) fn call_count_handle(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, _text: &str, _target: &str) -> PipelineResult<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.result.clone().ok_or_else(|| PipelineError::Translation {
            message: "quota exceeded".to_string(),
            status_code: Some(429),
        })
    }
}

/// Annotator returning a fixed annotation, or failing.
pub(crate) struct MockAnnotator {
    result: Option<Annotation>,
    call_count: Arc<AtomicU32>,
}

impl MockAnnotator {
    /// Three labels and five colors.
    pub(crate) fn sample() -> Self {
        Self {
            result: Some(Annotation {
                labels: vec![
                    Label::new("Water", 0.96),
                    Label::new("Whale", 0.98),
                    Label::new("Marine mammal", 0.91),
                ],
                colors: vec![
                    Rgb::new(16, 32, 64),
                    Rgb::new(200, 220, 240),
                    Rgb::new(0, 0, 0),
                    Rgb::new(255, 255, 255),
                    Rgb::new(90, 90, 90),
                ],
            }),
            call_count: Arc::new(AtomicU32::new(0)),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            result: None,
            call_count: Arc::new(AtomicU32::new(0)),
        }
    }

    pub(crate) fn call_count_handle(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait]
impl Annotator for MockAnnotator {
    async fn annotate(&self, _image: &[u8]) -> PipelineResult<Annotation> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.result.clone().ok_or_else(|| PipelineError::Annotation {
            message: "Bad image data".to_string(),
            status_code: None,
        })
    }
}

/// Fetcher returning a few bytes, or a fixed HTTP status.
pub(crate) struct MockFetcher {
    status: u16,
    urls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub(crate) fn ok() -> Self {
        Self::status(200)
    }

    pub(crate) fn status(status: u16) -> Self {
        Self {
            status,
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn urls_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.urls)
    }
}

#[async_trait]
impl ImageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> PipelineResult<Vec<u8>> {
        self.urls.lock().unwrap().push(url.to_string());
        if self.status != 200 {
            return Err(PipelineError::Fetch {
                url: url.to_string(),
                message: format!("HTTP {}", self.status),
                status_code: Some(self.status),
            });
        }
        Ok(vec![0xFF, 0xD8, 0xFF, 0xE0])
    }
}
