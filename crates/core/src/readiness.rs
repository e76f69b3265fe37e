//! Readiness gate for hosts that render asynchronously.
//!
//! Responsibilities:
//! - Delay the first attach until the host reports ready, with a bounded poll.
//!
//! Invariants:
//! - `wait` always completes: after `max_attempts` unsuccessful polls it
//!   reports `TimedOut` and the caller attaches anyway.

use std::sync::Arc;

use selchord_config::ReadinessSettings;

/// Reports whether the host surface is ready to receive listeners.
pub trait ReadinessProbe: Send + Sync {
    fn is_ready(&self) -> bool;
}

/// Result of a gate wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Probe reported ready on poll number `attempts`.
    Ready { attempts: u32 },
    /// Probe never reported ready within the bound.
    TimedOut { attempts: u32 },
}

#[derive(Clone)]
pub struct ReadinessGate {
    settings: ReadinessSettings,
    probe: Arc<dyn ReadinessProbe>,
}

impl ReadinessGate {
    pub fn new(settings: ReadinessSettings, probe: Arc<dyn ReadinessProbe>) -> Self {
        Self { settings, probe }
    }

    /// Wait `initial_delay`, then poll every `interval` up to `max_attempts`.
    pub async fn wait(&self) -> GateOutcome {
        tokio::time::sleep(self.settings.initial_delay).await;

        let max_attempts = self.settings.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            if self.probe.is_ready() {
                return GateOutcome::Ready { attempts: attempt };
            }
            if attempt < max_attempts {
                tokio::time::sleep(self.settings.interval).await;
            }
        }

        GateOutcome::TimedOut {
            attempts: max_attempts,
        }
    }
}

impl std::fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
