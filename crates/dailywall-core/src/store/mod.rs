//! Document store access.
//!
//! Writes use merge semantics: only the fields present in the serialized
//! record are written, every other stored field is left alone. Because
//! `Wallpaper` skips empty fields on serialization, upserting a record that
//! carries no tags keeps the stored tags.

mod file;
mod firestore;
pub(crate) mod value;

pub use file::FileStore;
pub use firestore::FirestoreStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::{ConfigError, PipelineError, PipelineResult};
use crate::http::{resolve_env_var, GoogleAuth};
use crate::types::Wallpaper;

/// Keyed wallpaper documents.
#[async_trait]
pub trait WallpaperStore: Send + Sync {
    /// Backend name for logging (e.g., "firestore", "file").
    fn name(&self) -> &str;

    /// Fetch the record stored under `id`, if any.
    async fn get(&self, id: &str) -> PipelineResult<Option<Wallpaper>>;

    /// Merge-write `wallpaper` under its identifier.
    async fn upsert(&self, wallpaper: &Wallpaper) -> PipelineResult<()>;
}

/// Serialize a wallpaper into the top-level fields a merge write carries.
pub(crate) fn write_fields(wallpaper: &Wallpaper) -> PipelineResult<Map<String, Value>> {
    match serde_json::to_value(wallpaper) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(PipelineError::store(format!(
            "wallpaper {} serialized to a non-object: {other}",
            wallpaper.id
        ))),
        Err(e) => Err(PipelineError::store(format!(
            "failed to serialize wallpaper {}: {e}",
            wallpaper.id
        ))),
    }
}

/// Overlay `fields` onto a stored document, keeping fields it does not name.
pub(crate) fn merge_fields(stored: &mut Map<String, Value>, fields: Map<String, Value>) {
    for (key, value) in fields {
        stored.insert(key, value);
    }
}

/// Decode a stored document, filling in the identifier for legacy documents.
pub(crate) fn decode_record(id: &str, document: Value) -> PipelineResult<Wallpaper> {
    let mut wallpaper: Wallpaper = serde_json::from_value(document)
        .map_err(|e| PipelineError::store(format!("failed to decode wallpaper {id}: {e}")))?;
    if wallpaper.id.is_empty() {
        wallpaper.id = id.to_string();
    }
    Ok(wallpaper)
}

/// Factory that creates the configured store backend.
pub struct StoreFactory;

impl StoreFactory {
    /// Create a store from config.
    ///
    /// # Arguments
    /// * `config` - The `[store]` section
    /// * `file_path` - Resolved path for the file backend
    /// * `auth` - Google credentials for the Firestore backend
    /// * `client` - Shared HTTP client
    pub fn create(
        config: &StoreConfig,
        file_path: PathBuf,
        auth: GoogleAuth,
        client: reqwest::Client,
    ) -> Result<Box<dyn WallpaperStore>, ConfigError> {
        match config.backend {
            StoreBackend::Firestore => {
                let project_id = resolve_env_var(&config.project_id).ok_or_else(|| {
                    ConfigError::ValidationError(
                        "Firestore project not set. Set store.project_id or the PROJECT_ID env var."
                            .to_string(),
                    )
                })?;
                Ok(Box::new(FirestoreStore::new(
                    &config.endpoint,
                    &project_id,
                    &config.collection,
                    auth,
                    client,
                )))
            }
            StoreBackend::File => {
                let store = FileStore::new(file_path);
                tracing::debug!("Using file store at {}", store.path().display());
                Ok(Box::new(store))
            }
        }
    }
}
