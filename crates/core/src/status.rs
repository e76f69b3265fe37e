//! Status signals emitted around chord dispatch.
//!
//! Responsibilities:
//! - Define the four lifecycle statuses with their labels and badge colors.
//! - Define the `StatusSink` trait hosts implement to render them.
//! - Provide `StatusLog`, a sink that records a timeline.
//!
//! Invariants:
//! - `Success` and `Copied` are transient; `Processing` and `Error` persist
//!   until replaced or cleared.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::selection::Rect;

/// Lifecycle status of a dispatched chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Processing,
    Success,
    Error,
    Copied,
}

impl Status {
    /// Badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Processing => "Processing...",
            Self::Success => "Done",
            Self::Error => "Error",
            Self::Copied => "Copied",
        }
    }

    /// Badge background color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Processing => "#ff6b35",
            Self::Success => "#28a745",
            Self::Error => "#dc3545",
            Self::Copied => "#17a2b8",
        }
    }

    /// How long the status stays visible before fading, if it fades at all.
    pub fn auto_clear(&self, timeout: Duration) -> Option<Duration> {
        match self {
            Self::Success | Self::Copied => Some(timeout),
            Self::Processing | Self::Error => None,
        }
    }

    /// True for statuses that end a dispatch.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Processing)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Error => "error",
            Self::Copied => "copied",
        };
        f.write_str(name)
    }
}

/// Renders status signals.
pub trait StatusSink: Send + Sync {
    /// Show `status`, replacing any visible status.
    fn show(&self, status: Status, anchor: Option<Rect>);

    /// Remove any visible status.
    fn clear(&self);
}

/// One entry in a [`StatusLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    Shown(Status),
    Cleared,
}

/// Sink that records every show/clear in order.
#[derive(Debug, Clone, Default)]
pub struct StatusLog {
    events: Arc<Mutex<Vec<StatusEvent>>>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the recorded timeline.
    pub fn events(&self) -> Vec<StatusEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Only the shown statuses, in order.
    pub fn shown(&self) -> Vec<Status> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                StatusEvent::Shown(status) => Some(status),
                StatusEvent::Cleared => None,
            })
            .collect()
    }

    fn push(&self, event: StatusEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl StatusSink for StatusLog {
    fn show(&self, status: Status, _anchor: Option<Rect>) {
        self.push(StatusEvent::Shown(status));
    }

    fn clear(&self) {
        self.push(StatusEvent::Cleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(Status::Processing.label(), "Processing...");
        assert_eq!(Status::Success.color(), "#28a745");
        assert_eq!(Status::Error.color(), "#dc3545");
        assert_eq!(Status::Copied.label(), "Copied");
        assert_eq!(Status::Copied.to_string(), "copied");
    }

    #[test]
    fn test_only_success_and_copied_fade() {
        let timeout = Duration::from_millis(2000);
        assert_eq!(Status::Success.auto_clear(timeout), Some(timeout));
        assert_eq!(Status::Copied.auto_clear(timeout), Some(timeout));
        assert_eq!(Status::Processing.auto_clear(timeout), None);
        assert_eq!(Status::Error.auto_clear(timeout), None);
    }

    #[test]
    fn test_status_log_records_in_order() {
        let log = StatusLog::new();
        log.show(Status::Processing, None);
        log.show(Status::Success, None);
        log.clear();

        assert_eq!(
            log.events(),
            vec![
                StatusEvent::Shown(Status::Processing),
                StatusEvent::Shown(Status::Success),
                StatusEvent::Cleared,
            ]
        );
        assert_eq!(log.shown(), vec![Status::Processing, Status::Success]);
    }
}
