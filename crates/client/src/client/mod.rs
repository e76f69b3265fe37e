//! Chat-completion client.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Prompt wording and result post-processing (see [`crate::actions`])
//!
//! # Invariants
//! - A call without an API key fails with `MissingApiKey` before any request is sent
//! - Every call records one duration sample when metrics are enabled

pub mod builder;

use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{ChatMessage, ChatRequest};

/// Chat-completion API client.
#[derive(Debug)]
pub struct ChatClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_key: Option<SecretString>,
    pub(crate) model: String,
    pub(crate) timeout: Duration,
    pub(crate) max_retries: usize,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl ChatClient {
    /// Create a new client builder.
    pub fn builder() -> builder::ChatClientBuilder {
        builder::ChatClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one system + user exchange and return the trimmed reply.
    ///
    /// `Ok(None)` means the API answered but produced no content.
    ///
    /// # Errors
    /// `MissingApiKey` when no key is configured, otherwise any error from
    /// [`endpoints::chat_completion`].
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<Option<String>> {
        let Some(api_key) = self.api_key.as_ref() else {
            return Err(ClientError::MissingApiKey);
        };

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature,
        };

        let span = tracing::info_span!(
            "chat.complete",
            model = %self.model,
            temperature = temperature as f64,
            prompt_chars = user.chars().count(),
        );

        let started = Instant::now();
        let result = endpoints::chat_completion(
            &self.http,
            &self.base_url,
            api_key.expose_secret(),
            &request,
            self.max_retries,
            self.timeout,
            self.metrics.as_ref(),
        )
        .instrument(span)
        .await;

        if let Some(metrics) = &self.metrics {
            let status = match &result {
                Ok(_) => Some(200),
                Err(ClientError::ApiError { status, .. }) => Some(*status),
                Err(_) => None,
            };
            metrics.record_request_duration(&self.model, started.elapsed(), status);
            if let Err(e) = &result {
                metrics.record_client_error(&self.model, e);
            }
        }

        match &result {
            Ok(Some(content)) => {
                tracing::debug!(chars = content.chars().count(), "Completion received")
            }
            Ok(None) => tracing::warn!("Completion returned no content"),
            Err(e) => tracing::warn!(error = %e, "Completion failed"),
        }

        result
    }
}
