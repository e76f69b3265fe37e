//! Metrics collection for chat-completion calls.
//!
//! This module records:
//! - Request latency histograms
//! - Request counters (total, retries, errors)
//! - Error categorization
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (see [`crate::metrics_exporter`])
//! - Detector-side metrics (the core crate records those)
//!
//! # Invariants
//! - All metrics use consistent label names: `model`, `status`, `error_category`
//! - Metric recording is infallible and never disrupts API calls
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "selchord_chat_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "selchord_chat_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "selchord_chat_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "selchord_chat_errors_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No credential configured or credential rejected.
    Auth,
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Rate limited on every attempt
    RateLimited,
    /// Request timeout
    Timeout,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "auth",
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::RateLimited => "rate_limited",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::MissingApiKey => ErrorCategory::Auth,
            ClientError::Timeout(_) => ErrorCategory::Timeout,
            ClientError::MaxRetriesExceeded(_) => ErrorCategory::RateLimited,
            ClientError::ApiError { status, .. } => match status {
                401 | 403 => ErrorCategory::Auth,
                400..=499 => ErrorCategory::Http4xx,
                500..=599 => ErrorCategory::Http5xx,
                _ => ErrorCategory::Unknown,
            },
            ClientError::HttpError(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::HttpError(e) if e.is_connect() => ErrorCategory::Transport,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Thin wrapper over the `metrics` macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of one completion call, including retries.
    ///
    /// `status` is `None` when the call failed before a response arrived.
    pub fn record_request_duration(&self, model: &str, duration: Duration, status: Option<u16>) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "model" => model.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt (every attempt, including retries).
    pub fn record_request(&self, model: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL, "model" => model.to_string()).increment(1);
    }

    /// Record a retry (1-based attempt number of the retry).
    pub fn record_retry(&self, model: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "model" => model.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    /// Record an error, categorized.
    pub fn record_client_error(&self, model: &str, error: &ClientError) {
        if !self.enabled {
            return;
        }

        let category = ErrorCategory::from(error);
        metrics::counter!(METRIC_ERRORS_TOTAL,
            "model" => model.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "test".to_string(),
            message: "message".to_string(),
        }
    }

    #[test]
    fn test_error_category_as_str() {
        assert_eq!(ErrorCategory::Auth.as_str(), "auth");
        assert_eq!(ErrorCategory::Http4xx.as_str(), "http_4xx");
        assert_eq!(ErrorCategory::RateLimited.as_str(), "rate_limited");
        assert_eq!(ErrorCategory::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_error_categorization() {
        assert_eq!(
            ErrorCategory::from(&ClientError::MissingApiKey),
            ErrorCategory::Auth
        );
        assert_eq!(ErrorCategory::from(&api_error(401)), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from(&api_error(400)), ErrorCategory::Http4xx);
        assert_eq!(ErrorCategory::from(&api_error(503)), ErrorCategory::Http5xx);
        assert_eq!(ErrorCategory::from(&api_error(200)), ErrorCategory::Unknown);
        assert_eq!(
            ErrorCategory::from(&ClientError::MaxRetriesExceeded(4)),
            ErrorCategory::RateLimited
        );
        assert_eq!(
            ErrorCategory::from(&ClientError::Timeout(Duration::from_secs(1))),
            ErrorCategory::Timeout
        );
    }

    #[test]
    fn test_metrics_collector_enabled() {
        assert!(MetricsCollector::new().is_enabled());
        assert!(!MetricsCollector::disabled().is_enabled());
        assert!(!MetricsCollector::default().is_enabled());
    }
}
