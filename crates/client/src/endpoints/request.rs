//! Retry helper for chat-completion requests with exponential backoff.
//!
//! Responsibilities:
//! - Retry HTTP 429 (Too Many Requests) with 2^attempt second backoff
//! - Map non-success statuses to [`ClientError::ApiError`] with the API's message
//! - Map transport timeouts to [`ClientError::Timeout`]
//!
//! Does NOT handle:
//! - Authentication headers (set by the caller on the builder)
//! - Response body parsing for successful calls

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::ApiErrorBody;

/// Sends a request, retrying rate-limited responses up to `max_retries` times.
///
/// `timeout` is only used to label [`ClientError::Timeout`]; the deadline
/// itself is enforced by the `reqwest::Client`.
///
/// # Errors
///
/// Returns `MaxRetriesExceeded` when every attempt was rate limited,
/// `ApiError` for any other non-success status, and `Timeout` / `HttpError`
/// for transport failures.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    timeout: Duration,
    metrics: Option<(&MetricsCollector, &str)>,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let Some(attempt_builder) = builder.try_clone() else {
            debug!("Request builder cannot be cloned, single attempt only");
            return builder.send().await.map_err(|e| map_transport(e, timeout));
        };

        if let Some((collector, model)) = metrics {
            collector.record_request(model);
        }

        let response = attempt_builder
            .send()
            .await
            .map_err(|e| map_transport(e, timeout))?;

        let status = response.status().as_u16();
        if ClientError::is_retryable_status(status) {
            if attempt == max_retries {
                debug!(attempts = attempt + 1, "Max retries exhausted for rate-limited request");
                return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
            }

            let backoff_secs = 2u64.pow(attempt as u32);
            debug!(
                attempt = attempt + 1,
                max_retries = max_retries + 1,
                backoff_secs,
                "Rate limited (HTTP 429), retrying with exponential backoff"
            );
            if let Some((collector, model)) = metrics {
                collector.record_retry(model, attempt + 1);
            }
            tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
            continue;
        }

        if response.status().is_success() {
            if attempt > 0 {
                debug!(attempt = attempt + 1, "Request succeeded after retry");
            }
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::ApiError {
            status,
            url,
            message: ApiErrorBody::message_from(&body),
        });
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

fn map_transport(error: reqwest::Error, timeout: Duration) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout(timeout)
    } else {
        ClientError::HttpError(error)
    }
}
