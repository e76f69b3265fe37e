//! Chat-completion endpoint.

use std::time::Duration;

use reqwest::Client;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{ChatRequest, ChatResponse};
use crate::tracing::inject_trace_context;

/// `POST {base_url}/chat/completions`, returning the first choice's trimmed
/// content (`None` when the model returned nothing).
pub async fn chat_completion(
    client: &Client,
    base_url: &str,
    api_key: &str,
    request: &ChatRequest,
    max_retries: usize,
    timeout: Duration,
    metrics: Option<&MetricsCollector>,
) -> Result<Option<String>> {
    let url = format!("{}/chat/completions", base_url);

    let builder = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(request);
    let builder = inject_trace_context(builder);

    let response = send_request_with_retry(
        builder,
        max_retries,
        timeout,
        metrics.map(|m| (m, request.model.as_str())),
    )
    .await?;

    let body: ChatResponse = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse completion: {}", e)))?;

    Ok(body.first_content())
}
