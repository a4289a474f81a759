//! Local JSON file store for offline runs.
//!
//! The file holds one JSON object mapping identifier to document. Writes
//! follow the same merge semantics as the Firestore backend.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{decode_record, merge_fields, write_fields, WallpaperStore};
use crate::error::{PipelineError, PipelineResult};
use crate::types::Wallpaper;

/// Wallpaper documents kept in a single JSON file.
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> PipelineResult<Map<String, Value>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(PipelineError::store(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            PipelineError::store(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    async fn save(&self, documents: &Map<String, Value>) -> PipelineResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                PipelineError::store(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let content = serde_json::to_string_pretty(documents)
            .map_err(|e| PipelineError::store(format!("failed to serialize documents: {e}")))?;
        tokio::fs::write(&self.path, content).await.map_err(|e| {
            PipelineError::store(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl WallpaperStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, id: &str) -> PipelineResult<Option<Wallpaper>> {
        let _guard = self.lock.lock().await;
        let mut documents = self.load().await?;
        match documents.remove(id) {
            Some(document) => decode_record(id, document).map(Some),
            None => Ok(None),
        }
    }

    async fn upsert(&self, wallpaper: &Wallpaper) -> PipelineResult<()> {
        let _guard = self.lock.lock().await;
        let mut documents = self.load().await?;
        let fields = write_fields(wallpaper)?;

        match documents.get_mut(&wallpaper.id) {
            Some(Value::Object(stored)) => merge_fields(stored, fields),
            _ => {
                documents.insert(wallpaper.id.clone(), Value::Object(fields));
            }
        }

        self.save(&documents).await
    }
}
