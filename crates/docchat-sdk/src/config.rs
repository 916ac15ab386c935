//! Client configuration.
//!
//! The only knob is the backend base URL. Both endpoints are derived from
//! it, see [`crate::Endpoints`].

use crate::error::SdkError;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the base URL.
pub const API_URL_ENV: &str = "DOCCHAT_API_URL";

/// Configuration for [`crate::DocChatClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable          | Default                 | Description      |
    /// |-------------------|-------------------------|------------------|
    /// | `DOCCHAT_API_URL` | `http://localhost:8000` | Backend base URL |
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an injectable variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup(API_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::default().with_api_url(&api_url)
    }

    /// Override the base URL (e.g. from a `--api-url` flag).
    #[must_use]
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Check that the base URL is an absolute `http(s)` URL.
    pub fn validate(&self) -> Result<(), SdkError> {
        let url = reqwest::Url::parse(&self.api_url)
            .map_err(|e| SdkError::Config(format!("invalid API URL \"{}\": {e}", self.api_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(SdkError::Config(format!(
                "unsupported URL scheme \"{other}\" in {}",
                self.api_url
            ))),
        }
    }
}
