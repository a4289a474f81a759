//! Error types for the dailywall ingestion pipeline.
//!
//! Errors are organized by stage so a failed invocation reports which
//! collaborator broke (image source, store, translator, annotator) together
//! with the relevant context (market, URL, HTTP status).

use thiserror::Error;

/// Top-level error type for dailywall operations.
#[derive(Error, Debug)]
pub enum DailywallError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline errors, organized by stage.
///
/// Every variant is fatal for the running invocation: nothing is retried and
/// writes committed before the failure stay in the store.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The image source failed or returned a malformed listing
    #[error("Discovery failed for market {market}: {message}")]
    Discovery {
        market: String,
        message: String,
        status_code: Option<u16>,
    },

    /// A discovered image could not be normalized (bad date, empty caption)
    #[error("Parse error for {input:?}: {message}")]
    Parse { input: String, message: String },

    /// Document store read or write failed
    #[error("Store error: {message}")]
    Store {
        message: String,
        status_code: Option<u16>,
    },

    /// Translation service failed
    #[error("Translation error: {message}")]
    Translation {
        message: String,
        status_code: Option<u16>,
    },

    /// Downloading the image bytes for annotation failed
    #[error("Fetch failed for {url}: {message}")]
    Fetch {
        url: String,
        message: String,
        status_code: Option<u16>,
    },

    /// Annotation service failed or reported a per-image error
    #[error("Annotation error: {message}")]
    Annotation {
        message: String,
        status_code: Option<u16>,
    },
}

impl PipelineError {
    /// Shorthand for a store error without an HTTP status.
    pub(crate) fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            status_code: None,
        }
    }
}

/// Convenience type alias for dailywall results.
pub type Result<T> = std::result::Result<T, DailywallError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
