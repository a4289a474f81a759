//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Image-of-the-day feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Feed host; relative URL-bases are resolved against it
    pub base_url: String,

    /// Number of recent images requested per market
    pub image_count: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.bing.com".to_string(),
            image_count: 8,
        }
    }
}

/// Which document store backs the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Firestore REST API
    #[default]
    Firestore,
    /// Local JSON file (offline runs)
    File,
}

/// Document store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend selection
    pub backend: StoreBackend,

    /// Firestore REST endpoint
    pub endpoint: String,

    /// Firestore project (supports ${ENV_VAR} syntax)
    pub project_id: String,

    /// Collection holding one document per wallpaper
    pub collection: String,

    /// Path of the JSON document used by the file backend
    pub file_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Firestore,
            endpoint: "https://firestore.googleapis.com/v1".to_string(),
            project_id: "${PROJECT_ID}".to_string(),
            collection: "BingWallpapers".to_string(),
            file_path: "~/.dailywall/wallpapers.json".to_string(),
        }
    }
}

/// Google API credentials and endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// OAuth bearer token (supports ${ENV_VAR} syntax)
    pub access_token: String,

    /// Translation v2 endpoint
    pub translate_endpoint: String,

    /// Vision v1 endpoint
    pub vision_endpoint: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: "${GOOGLE_API_KEY}".to_string(),
            access_token: "${GOOGLE_ACCESS_TOKEN}".to_string(),
            translate_endpoint: "https://translation.googleapis.com/language/translate/v2"
                .to_string(),
            vision_endpoint: "https://vision.googleapis.com/v1".to_string(),
        }
    }
}

/// Network and enrichment limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Client-level timeout shared by every outbound HTTP call
    pub http_timeout_ms: u64,

    /// Maximum labels requested from the annotation service
    pub max_labels: u32,

    /// Maximum dominant colors kept per wallpaper
    pub max_colors: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            http_timeout_ms: 15_000,
            max_labels: 50,
            max_colors: 4,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
