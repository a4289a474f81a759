//! Google Cloud Translation (v2 REST) client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Translator;
use crate::error::{PipelineError, PipelineResult};
use crate::http::{error_body, GoogleAuth};

/// Translation v2 client.
pub struct GoogleTranslator {
    endpoint: String,
    auth: GoogleAuth,
    client: reqwest::Client,
}

impl GoogleTranslator {
    pub fn new(endpoint: &str, auth: GoogleAuth, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            auth,
            client,
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: Vec<&'a str>,
    target: &'a str,
    format: &'static str,
}

// --- Response types ---

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    #[serde(rename = "translatedText", default)]
    translated_text: String,
}

/// Pull the single translation out of a response body.
fn first_translation(body: TranslateResponse, text: &str) -> PipelineResult<String> {
    body.data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or_else(|| PipelineError::Translation {
            message: format!("translate returned no translations for {text:?}"),
            status_code: None,
        })
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str) -> PipelineResult<String> {
        let body = TranslateRequest {
            q: vec![text],
            target,
            format: "text",
        };

        let resp = self
            .auth
            .apply(self.client.post(&self.endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Translation {
                message: format!("translate request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PipelineError::Translation {
                message: error_body(resp).await,
                status_code: Some(status.as_u16()),
            });
        }

        let parsed: TranslateResponse =
            resp.json().await.map_err(|e| PipelineError::Translation {
                message: format!("failed to parse translate response: {e}"),
                status_code: None,
            })?;

        first_translation(parsed, text)
    }
}
