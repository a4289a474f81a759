//! Image-of-the-day feed access.
//!
//! The pipeline only depends on the `ImageSource` trait; `BingClient` is the
//! production implementation.

mod bing;

pub use bing::BingClient;

use async_trait::async_trait;

use crate::error::PipelineResult;
use crate::types::RawImage;

/// Lists the recent images published for one market.
///
/// Uses `async_trait` because the pipeline holds collaborators as
/// `Box<dyn ImageSource>`.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Images for `market`, in feed order.
    async fn list(&self, market: &str) -> PipelineResult<Vec<RawImage>>;
}
