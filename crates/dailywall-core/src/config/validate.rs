//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.source.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "source.base_url must not be empty".into(),
            ));
        }
        if self.source.image_count == 0 {
            return Err(ConfigError::ValidationError(
                "source.image_count must be > 0".into(),
            ));
        }
        if self.store.collection.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "store.collection must not be empty".into(),
            ));
        }
        if self.limits.http_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.http_timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.max_labels == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_labels must be > 0".into(),
            ));
        }
        if !(1..=4).contains(&self.limits.max_colors) {
            return Err(ConfigError::ValidationError(
                "limits.max_colors must be between 1 and 4".into(),
            ));
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !["error", "warn", "info", "debug", "trace"].contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of error, warn, info, debug, trace (got {:?})",
                self.logging.level
            )));
        }
        if !matches!(self.logging.format.to_ascii_lowercase().as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\" (got {:?})",
                self.logging.format
            )));
        }
        Ok(())
    }
}
