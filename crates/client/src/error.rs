//! Error types for the chat-completion client.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during chat-completion calls.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No API key configured; raised before any request is sent.
    #[error("API key not configured. Set SELCHORD_API_KEY or add api_key to your profile")]
    MissingApiKey,

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response from the API.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Response body did not have the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Rate limited on every attempt.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Check if an HTTP status code is retried by the request helper.
    ///
    /// Only 429 (Too Many Requests) is retried; every other failure is
    /// surfaced to the caller immediately.
    pub fn is_retryable_status(status: u16) -> bool {
        status == 429
    }

    /// Check if this error indicates a credential problem.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::MissingApiKey => true,
            Self::ApiError { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }

    /// True for failures of the API call itself (configuration, credentials,
    /// upstream status), as opposed to local processing failures.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey
                | Self::ApiError { .. }
                | Self::MaxRetriesExceeded(_)
                | Self::InvalidResponse(_)
        )
    }
}
