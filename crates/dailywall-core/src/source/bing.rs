//! Bing HPImageArchive client.

use async_trait::async_trait;
use serde::Deserialize;

use super::ImageSource;
use crate::error::{PipelineError, PipelineResult};
use crate::http::error_body;
use crate::types::RawImage;

/// Client for the `HPImageArchive.aspx` JSON feed.
pub struct BingClient {
    base_url: String,
    image_count: u32,
    client: reqwest::Client,
}

impl BingClient {
    pub fn new(base_url: &str, image_count: u32, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            image_count,
            client,
        }
    }

    fn list_url(&self) -> String {
        format!("{}/HPImageArchive.aspx", self.base_url)
    }
}

/// HPImageArchive response.
#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    market: Option<MarketInfo>,
    #[serde(default)]
    images: Vec<RawImage>,
}

#[derive(Deserialize)]
struct MarketInfo {
    #[serde(rename = "mkt", default)]
    market: String,
}

/// Decode a listing body, warning when the feed served a different market.
fn decode_listing(body: &str, market: &str) -> PipelineResult<Vec<RawImage>> {
    let listing: ListResponse =
        serde_json::from_str(body).map_err(|e| PipelineError::Discovery {
            market: market.to_string(),
            message: format!("failed to parse listing: {e}"),
            status_code: None,
        })?;

    if let Some(info) = &listing.market {
        if !info.market.eq_ignore_ascii_case(market) {
            tracing::warn!(
                "Market mismatch: requested {market}, feed answered for {}",
                info.market
            );
        }
    }

    Ok(listing.images)
}

#[async_trait]
impl ImageSource for BingClient {
    async fn list(&self, market: &str) -> PipelineResult<Vec<RawImage>> {
        let count = self.image_count.to_string();
        let resp = self
            .client
            .get(self.list_url())
            .query(&[
                ("format", "js"),
                ("n", count.as_str()),
                ("mbl", "1"),
                ("mkt", market),
            ])
            .send()
            .await
            .map_err(|e| PipelineError::Discovery {
                market: market.to_string(),
                message: format!("request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PipelineError::Discovery {
                market: market.to_string(),
                message: error_body(resp).await,
                status_code: Some(status.as_u16()),
            });
        }

        let body = resp.text().await.map_err(|e| PipelineError::Discovery {
            market: market.to_string(),
            message: format!("failed to read listing: {e}"),
            status_code: None,
        })?;

        decode_listing(&body, market)
    }
}
