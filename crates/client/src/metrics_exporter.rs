//! Prometheus metrics exporter.
//!
//! Serves metrics recorded through the `metrics` crate (detector and client)
//! in Prometheus text format at `/metrics`.
//!
//! # Example
//!
//! ```rust,ignore
//! use selchord_client::metrics_exporter::MetricsExporter;
//!
//! let exporter = MetricsExporter::install("127.0.0.1:9090")?;
//! ```

use std::net::SocketAddr;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::METRIC_REQUEST_DURATION;

const HANDLER_DURATION: &str = "selchord_handler_duration_seconds";

/// Latency buckets sized for LLM round-trips (hundreds of ms to tens of seconds).
const SLOW_CALL_BUCKETS: &[f64] = &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0];

/// Installed Prometheus exporter.
///
/// Installs a global recorder and starts an HTTP listener on the bind address.
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the Prometheus exporter as the global metrics recorder.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the bind address is invalid or the recorder cannot
    /// be built or installed.
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
                SLOW_CALL_BUCKETS,
            )?
            .set_buckets_for_metric(Matcher::Full(HANDLER_DURATION.to_string()), SLOW_CALL_BUCKETS)?
            .with_http_listener(addr)
            .install()?;

        info!(
            "Prometheus metrics exporter started on http://{}/metrics",
            addr
        );

        Ok(Self { bind_addr: addr })
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    /// Invalid bind address provided.
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    /// Failed to build or install the Prometheus recorder (including when
    /// another recorder is already installed).
    #[error("Failed to install Prometheus recorder: {0}")]
    BuildError(String),
}

impl From<metrics_exporter_prometheus::BuildError> for MetricsExporterError {
    fn from(err: metrics_exporter_prometheus::BuildError) -> Self {
        MetricsExporterError::BuildError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bind_address() {
        let result = MetricsExporter::install("not-a-valid-addr");
        assert!(matches!(
            result,
            Err(MetricsExporterError::InvalidBindAddress(_, _))
        ));
    }

    #[test]
    fn test_error_display() {
        let parse_error = "invalid".parse::<SocketAddr>().unwrap_err();
        let error = MetricsExporterError::InvalidBindAddress("test".to_string(), parse_error);
        assert!(error.to_string().contains("Invalid bind address 'test'"));

        let build = MetricsExporterError::BuildError("listener".to_string());
        assert_eq!(
            build.to_string(),
            "Failed to install Prometheus recorder: listener"
        );
    }
}
