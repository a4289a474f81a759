//! Image annotation: label detection and dominant colors.
//!
//! The annotator works on raw image bytes; `ImageFetcher` downloads them
//! from the candidate's image URL first.

mod fetch;
mod vision;

pub use fetch::HttpImageFetcher;
pub use vision::VisionAnnotator;

use async_trait::async_trait;

use crate::error::PipelineResult;
use crate::types::Annotation;

/// Detects labels and dominant colors for one image.
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Annotate the encoded image bytes.
    async fn annotate(&self, image: &[u8]) -> PipelineResult<Annotation>;
}

/// Downloads image bytes.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch `url`; anything but HTTP 200 is an error.
    async fn fetch(&self, url: &str) -> PipelineResult<Vec<u8>>;
}
