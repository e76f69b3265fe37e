//! Detector behaviour settings and deployment variants.
//!
//! Responsibilities:
//! - Define the two deployment variants and their default bindings.
//! - Define timing settings for chord recognition and listener lifecycle.
//! - Define the key-suppression policy applied to intercepted presses.
//!
//! Does NOT handle:
//! - Running the detector (see the core crate).
//! - Parsing user binding lists (see `keybind` module at crate root).
//!
//! Invariants:
//! - `DetectorSettings::for_variant` is the single source of per-variant defaults.
//! - Only the hosted variant gates its first attach on readiness.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CHORD_WINDOW_MS, DEFAULT_GENERAL_REATTACH_DELAY_MS, DEFAULT_HOSTED_REATTACH_DELAY_MS,
    DEFAULT_LOCATION_POLL_MS, DEFAULT_READINESS_INITIAL_DELAY_MS, DEFAULT_READINESS_INTERVAL_MS,
    DEFAULT_READINESS_MAX_ATTEMPTS, DEFAULT_SELECTION_CLEAR_DELAY_MS, DEFAULT_STATUS_TIMEOUT_MS,
};
use crate::keybind::{BindingSpec, PhysicalKey};
use crate::types::ActionId;

/// Deployment variant of the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Runs anywhere; respects editable focus and offers translation chords.
    #[default]
    General,
    /// Runs inside a specific single-page host app; always intercepts chords.
    Hosted,
}

impl Variant {
    /// Built-in bindings for this variant.
    pub fn default_bindings(&self) -> Vec<BindingSpec> {
        let pairs: &[(char, ActionId)] = match self {
            Self::General => &[
                ('J', ActionId::TranslateJapanese),
                ('C', ActionId::TranslateChinese),
            ],
            Self::Hosted => &[
                ('C', ActionId::ConfluenceSearch),
                ('E', ActionId::InternalQuestion),
                ('D', ActionId::DocsSearch),
                ('Z', ActionId::TicketSearch),
                ('J', ActionId::ImproveJapanese),
                ('T', ActionId::Translate),
            ],
        };

        pairs
            .iter()
            .map(|&(c, action)| BindingSpec {
                key: PhysicalKey::Letter(c),
                action,
            })
            .collect()
    }

    /// Suppression policy used by this variant.
    pub fn suppression(&self) -> SuppressionPolicy {
        match self {
            Self::General => SuppressionPolicy::UnlessEditableFocus,
            Self::Hosted => SuppressionPolicy::Always,
        }
    }

    /// Stable lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Hosted => "hosted",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "hosted" | "hosted-app" => Ok(Self::Hosted),
            other => Err(format!("unknown variant '{}', expected general or hosted", other)),
        }
    }
}

/// Whether an intercepted press has its default action suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuppressionPolicy {
    /// Suppress whenever a selection is present.
    Always,
    /// Suppress only when focus is outside an editable surface. Presses inside
    /// an editable surface are treated as normal typing.
    UnlessEditableFocus,
}

/// Readiness gate timing for hosts that render asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessSettings {
    /// Wait before the first readiness poll.
    pub initial_delay: Duration,
    /// Interval between polls.
    pub interval: Duration,
    /// Polls before attaching unconditionally.
    pub max_attempts: u32,
}

impl Default for ReadinessSettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(DEFAULT_READINESS_INITIAL_DELAY_MS),
            interval: Duration::from_millis(DEFAULT_READINESS_INTERVAL_MS),
            max_attempts: DEFAULT_READINESS_MAX_ATTEMPTS,
        }
    }
}

/// Timing and policy settings for a chord detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorSettings {
    /// Maximum gap between the two presses of a chord (exclusive).
    pub window: Duration,
    /// Suppression policy for intercepted presses.
    pub suppression: SuppressionPolicy,
    /// Delay between a navigation and re-attaching listeners.
    pub reattach_delay: Duration,
    /// Delay between a selection change and the empty-selection check.
    pub selection_clear_delay: Duration,
    /// How long transient statuses stay visible.
    pub status_timeout: Duration,
    /// Readiness gate, if the host needs one before attaching.
    pub readiness: Option<ReadinessSettings>,
    /// Poll interval for location-change detection.
    pub location_poll: Duration,
}

impl DetectorSettings {
    /// Default settings for a variant.
    pub fn for_variant(variant: Variant) -> Self {
        let (reattach_ms, readiness) = match variant {
            Variant::General => (DEFAULT_GENERAL_REATTACH_DELAY_MS, None),
            Variant::Hosted => (
                DEFAULT_HOSTED_REATTACH_DELAY_MS,
                Some(ReadinessSettings::default()),
            ),
        };

        Self {
            window: Duration::from_millis(DEFAULT_CHORD_WINDOW_MS),
            suppression: variant.suppression(),
            reattach_delay: Duration::from_millis(reattach_ms),
            selection_clear_delay: Duration::from_millis(DEFAULT_SELECTION_CLEAR_DELAY_MS),
            status_timeout: Duration::from_millis(DEFAULT_STATUS_TIMEOUT_MS),
            readiness,
            location_poll: Duration::from_millis(DEFAULT_LOCATION_POLL_MS),
        }
    }

    /// Override the chord window.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self::for_variant(Variant::General)
    }
}
