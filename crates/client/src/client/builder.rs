//! Client builder for constructing [`ChatClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeout, redirect limit)
//!
//! # What this module does NOT handle:
//! - Actual API calls (see [`ChatClient::complete`])
//! - Retry logic (see [`crate::endpoints::send_request_with_retry`])
//!
//! # Invariants
//! - A missing API key is not a build error; it is reported when a call is made
//! - The base URL is always normalized to have no trailing slashes

use std::time::Duration;

use secrecy::SecretString;
use selchord_config::{
    Config,
    constants::{
        DEFAULT_API_BASE_URL, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_MODEL,
        DEFAULT_TIMEOUT_SECS,
    },
};

use crate::client::ChatClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`ChatClient`].
///
/// # Example
///
/// ```rust,ignore
/// use selchord_client::ChatClient;
///
/// let client = ChatClient::builder()
///     .from_config(&config)
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// ```
pub struct ChatClientBuilder {
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
    timeout: Duration,
    max_retries: usize,
    metrics: Option<MetricsCollector>,
}

impl Default for ChatClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            metrics: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Maximum number of retries after a rate-limited (429) response.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Enable metrics collection.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Copy API settings from a loaded [`Config`].
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = config.api.base_url.clone();
        self.api_key = config.api.api_key.clone();
        self.model = config.api.model.clone();
        self.timeout = config.api.timeout;
        self.max_retries = config.api.max_retries;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `InvalidUrl` for an empty base URL, or `HttpError` if the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<ChatClient> {
        let base_url = Self::normalize_base_url(self.base_url);
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is required".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .build()?;

        Ok(ChatClient {
            http,
            base_url,
            api_key: self.api_key,
            model: self.model,
            timeout: self.timeout,
            max_retries: self.max_retries,
            metrics: self.metrics,
        })
    }

    fn normalize_base_url(url: String) -> String {
        url.trim().trim_end_matches('/').to_string()
    }
}
