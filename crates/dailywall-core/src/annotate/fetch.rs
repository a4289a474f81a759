//! HTTP image download.

use async_trait::async_trait;

use super::ImageFetcher;
use crate::error::{PipelineError, PipelineResult};

/// Downloads images with the shared HTTP client.
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> PipelineResult<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::Fetch {
                url: url.to_string(),
                message: format!("request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(PipelineError::Fetch {
                url: url.to_string(),
                message: format!("unexpected HTTP {status}"),
                status_code: Some(status.as_u16()),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| PipelineError::Fetch {
            url: url.to_string(),
            message: format!("failed to read body: {e}"),
            status_code: None,
        })?;

        tracing::debug!("Fetched {} bytes from {url}", bytes.len());
        Ok(bytes.to_vec())
    }
}
