//! Firestore REST (v1) document store.
//!
//! Reads are a plain document GET; writes are a PATCH with one
//! `updateMask.fieldPaths` entry per written field, which creates the
//! document when missing and otherwise touches only the masked fields.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::value::{decode_document, encode_fields};
use super::{decode_record, write_fields, WallpaperStore};
use crate::error::{PipelineError, PipelineResult};
use crate::http::{error_body, GoogleAuth};
use crate::types::Wallpaper;

/// Firestore collection of wallpaper documents.
pub struct FirestoreStore {
    endpoint: String,
    project_id: String,
    collection: String,
    auth: GoogleAuth,
    client: reqwest::Client,
}

impl FirestoreStore {
    pub fn new(
        endpoint: &str,
        project_id: &str,
        collection: &str,
        auth: GoogleAuth,
        client: reqwest::Client,
    ) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            collection: collection.to_string(),
            auth,
            client,
        }
    }

    /// Document URL with `id` pushed as a single, percent-encoded segment.
    fn document_url(&self, id: &str) -> PipelineResult<reqwest::Url> {
        if id.is_empty() {
            return Err(PipelineError::store("refusing to address a document with an empty id"));
        }
        let collection_url = format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.endpoint, self.project_id, self.collection
        );
        let mut url = reqwest::Url::parse(&collection_url).map_err(|e| {
            PipelineError::store(format!("invalid Firestore URL {collection_url}: {e}"))
        })?;
        url.path_segments_mut()
            .map_err(|_| PipelineError::store(format!("invalid Firestore URL {collection_url}")))?
            .push(id);
        Ok(url)
    }
}

/// Query pairs naming every top-level field of a merge write.
fn update_mask<'a>(fields: impl Iterator<Item = &'a String>) -> Vec<(&'static str, String)> {
    fields
        .map(|field| ("updateMask.fieldPaths", field.clone()))
        .collect()
}

fn request_failed(e: reqwest::Error) -> PipelineError {
    PipelineError::store(format!("Firestore request failed: {e}"))
}

#[async_trait]
impl WallpaperStore for FirestoreStore {
    fn name(&self) -> &str {
        "firestore"
    }

    async fn get(&self, id: &str) -> PipelineResult<Option<Wallpaper>> {
        let resp = self
            .auth
            .apply(self.client.get(self.document_url(id)?))
            .send()
            .await
            .map_err(request_failed)?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PipelineError::Store {
                message: format!("Firestore get {id}: {}", error_body(resp).await),
                status_code: Some(status.as_u16()),
            });
        }

        let document: Value = resp.json().await.map_err(|e| {
            PipelineError::store(format!("failed to parse Firestore document {id}: {e}"))
        })?;

        decode_record(id, decode_document(&document)?).map(Some)
    }

    async fn upsert(&self, wallpaper: &Wallpaper) -> PipelineResult<()> {
        let fields = write_fields(wallpaper)?;
        let mask = update_mask(fields.keys());
        let body = json!({ "fields": encode_fields(&fields) });

        let resp = self
            .auth
            .apply(self.client.patch(self.document_url(&wallpaper.id)?))
            .query(&mask)
            .json(&body)
            .send()
            .await
            .map_err(request_failed)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PipelineError::Store {
                message: format!(
                    "Firestore upsert {}: {}",
                    wallpaper.id,
                    error_body(resp).await
                ),
                status_code: Some(status.as_u16()),
            });
        }

        tracing::trace!("Firestore upsert {} ({} fields)", wallpaper.id, mask.len());
        Ok(())
    }
}
