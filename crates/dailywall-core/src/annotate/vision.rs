//! Google Cloud Vision (`images:annotate`) client.
//!
//! Sends the image as base64 content with two features: label detection and
//! image properties (dominant colors).

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::Annotator;
use crate::error::{PipelineError, PipelineResult};
use crate::http::{error_body, GoogleAuth};
use crate::types::{Annotation, Label, Rgb};

/// Vision v1 client.
pub struct VisionAnnotator {
    endpoint: String,
    max_labels: u32,
    max_colors: u32,
    auth: GoogleAuth,
    client: reqwest::Client,
}

impl VisionAnnotator {
    pub fn new(
        endpoint: &str,
        max_labels: u32,
        max_colors: u32,
        auth: GoogleAuth,
        client: reqwest::Client,
    ) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            max_labels,
            max_colors,
            auth,
            client,
        }
    }

    fn annotate_url(&self) -> String {
        format!("{}/images:annotate", self.endpoint)
    }

    fn build_request(&self, image: &[u8]) -> BatchRequest {
        BatchRequest {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: base64::engine::general_purpose::STANDARD.encode(image),
                },
                features: vec![
                    Feature {
                        feature_type: "LABEL_DETECTION",
                        max_results: self.max_labels,
                    },
                    Feature {
                        feature_type: "IMAGE_PROPERTIES",
                        max_results: self.max_colors,
                    },
                ],
            }],
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct BatchRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    #[serde(rename = "maxResults")]
    max_results: u32,
}

// --- Response types ---

#[derive(Deserialize)]
struct BatchResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ImageResponse {
    label_annotations: Vec<EntityAnnotation>,
    image_properties_annotation: Option<ImageProperties>,
    error: Option<Status>,
}

#[derive(Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageProperties {
    dominant_colors: Option<DominantColors>,
}

#[derive(Deserialize)]
struct DominantColors {
    #[serde(default)]
    colors: Vec<ColorInfo>,
}

#[derive(Deserialize)]
struct ColorInfo {
    color: Color,
}

// Channels are floats in [0, 255]; absent channels mean 0.
#[derive(Deserialize, Default)]
#[serde(default)]
struct Color {
    red: f32,
    green: f32,
    blue: f32,
}

#[derive(Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Convert the first image response into an `Annotation`.
fn into_annotation(batch: BatchResponse) -> PipelineResult<Annotation> {
    let Some(response) = batch.responses.into_iter().next() else {
        return Err(PipelineError::Annotation {
            message: "annotation returned no responses".to_string(),
            status_code: None,
        });
    };

    if let Some(status) = response.error {
        return Err(PipelineError::Annotation {
            message: format!("image rejected (code {}): {}", status.code, status.message),
            status_code: None,
        });
    }

    let labels = response
        .label_annotations
        .into_iter()
        .map(|a| Label::new(a.description, a.score))
        .collect();

    let colors = response
        .image_properties_annotation
        .and_then(|p| p.dominant_colors)
        .map(|d| d.colors)
        .unwrap_or_default()
        .into_iter()
        .map(|c| Rgb::new(channel(c.color.red), channel(c.color.green), channel(c.color.blue)))
        .collect();

    Ok(Annotation { labels, colors })
}

#[async_trait]
impl Annotator for VisionAnnotator {
    async fn annotate(&self, image: &[u8]) -> PipelineResult<Annotation> {
        let body = self.build_request(image);

        let resp = self
            .auth
            .apply(self.client.post(self.annotate_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Annotation {
                message: format!("annotate request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PipelineError::Annotation {
                message: error_body(resp).await,
                status_code: Some(status.as_u16()),
            });
        }

        let batch: BatchResponse = resp.json().await.map_err(|e| PipelineError::Annotation {
            message: format!("failed to parse annotate response: {e}"),
            status_code: None,
        })?;

        into_annotation(batch)
    }
}
