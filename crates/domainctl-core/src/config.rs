//! Provider configuration
//!
//! One [`ProviderConfig`] describes one configured endpoint + credential
//! pair. It is validated at the boundary and then handed, by reference, to
//! whatever builds the API gateway.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default SparkPost API endpoint (EU region)
pub const DEFAULT_API_URL: &str = "https://api.eu.sparkpost.com/api/v1/";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "SPARKPOST_API_KEY";

/// Environment variable overriding the API URL
pub const API_URL_ENV: &str = "SPARKPOST_API_URL";

/// Configuration for one provider instance
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL every request path is joined onto
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key sent on every request
    /// ⚠️ NEVER log this value
    pub api_key: String,

    /// Optional request timeout; `None` keeps the HTTP client's defaults
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<REDACTED>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a configuration for the default endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: default_api_url(),
            api_key: api_key.into(),
            timeout_secs: None,
        }
    }

    /// Point the configuration at another endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set an explicit request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Load configuration from environment variables
    ///
    /// `SPARKPOST_API_KEY` is required, `SPARKPOST_API_URL` is optional.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::config(format!("{} is required", API_KEY_ENV)))?;

        let config = match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(api_key).with_api_url(url),
            _ => Self::new(api_key),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON document
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::config("api_key cannot be empty"));
        }

        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(Error::config(format!(
                "api_url must use an HTTP or HTTPS scheme. Got: {}",
                self.api_url
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(Error::config("timeout_secs must be > 0 when set"));
        }

        Ok(())
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
