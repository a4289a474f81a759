//! Title translation.

mod google;

pub use google::GoogleTranslator;

use async_trait::async_trait;

use crate::error::PipelineResult;

/// Target language for every stored title.
pub const TARGET_LANGUAGE: &str = "en";

/// Translates plain text.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`.
    ///
    /// An empty string is a valid result; callers decide how to treat it.
    async fn translate(&self, text: &str, target: &str) -> PipelineResult<String>;
}
