//! Metrics recorded by the detector.
//!
//! # Invariants
//! - Labels are `action` and, for outcomes, `status`.
//! - Zero-cost when no metrics recorder is installed.

use std::time::Duration;

use selchord_config::ActionId;

use crate::status::Status;

/// Metric name for recognized chord counter.
pub const METRIC_CHORDS_RECOGNIZED: &str = "selchord_chords_recognized_total";

/// Metric name for handler duration histogram.
pub const METRIC_HANDLER_DURATION: &str = "selchord_handler_duration_seconds";

/// Metric name for handler error counter (rejections and panics).
pub const METRIC_HANDLER_ERRORS: &str = "selchord_handler_errors_total";

pub(crate) fn record_recognized(action: ActionId) {
    metrics::counter!(METRIC_CHORDS_RECOGNIZED, "action" => action.as_str()).increment(1);
}

pub(crate) fn record_settled(action: ActionId, status: Status, elapsed: Duration) {
    metrics::histogram!(
        METRIC_HANDLER_DURATION,
        "action" => action.as_str(),
        "status" => status.to_string()
    )
    .record(elapsed.as_secs_f64());

    if status == Status::Error {
        metrics::counter!(METRIC_HANDLER_ERRORS, "action" => action.as_str()).increment(1);
    }
}
