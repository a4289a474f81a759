//! Shared HTTP plumbing for the external service clients.
//!
//! One `reqwest::Client` with a fixed client-level timeout is built per
//! process and cloned into every service client, so image-source, store,
//! translation and annotation calls are all bounded the same way.

use std::time::Duration;

use crate::config::{Config, GoogleConfig};
use crate::error::ConfigError;

/// Resolve `${ENV_VAR}` references in config strings.
///
/// Plain values pass through; empty values and unset variables yield `None`.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Build the process-wide HTTP client.
pub fn build_client(config: &Config) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(config.limits.http_timeout_ms))
        .user_agent(concat!("dailywall/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConfigError::ValidationError(format!("failed to build HTTP client: {e}")))
}

/// Credentials for Google REST APIs.
///
/// Requests carry the bearer token when one is configured and the API key
/// as the `key` query parameter when one is configured.
#[derive(Debug, Clone, Default)]
pub struct GoogleAuth {
    api_key: Option<String>,
    access_token: Option<String>,
}

impl GoogleAuth {
    pub fn new(api_key: Option<String>, access_token: Option<String>) -> Self {
        Self {
            api_key,
            access_token,
        }
    }

    /// Resolve credentials from config, reading `${ENV_VAR}` references.
    pub fn from_config(config: &GoogleConfig) -> Self {
        Self::new(
            resolve_env_var(&config.api_key),
            resolve_env_var(&config.access_token),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() || self.access_token.is_some()
    }

    /// Attach credentials to a request.
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        match &self.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        }
    }
}

/// Read a failed response body for an error message.
pub(crate) async fn error_body(resp: reqwest::Response) -> String {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    format!("HTTP {status}: {}", text.trim())
}
