//! Centralized constants for the selchord workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Chord Detection Defaults
// =============================================================================

/// Default double-press window in milliseconds.
pub const DEFAULT_CHORD_WINDOW_MS: u64 = 400;

/// Smallest accepted chord window in milliseconds.
pub const MIN_CHORD_WINDOW_MS: u64 = 50;

/// Largest accepted chord window in milliseconds.
pub const MAX_CHORD_WINDOW_MS: u64 = 5000;

/// Delay between a selection change and the "is the selection empty?" check.
pub const DEFAULT_SELECTION_CLEAR_DELAY_MS: u64 = 100;

/// How long transient statuses (`success`, `copied`) stay visible.
pub const DEFAULT_STATUS_TIMEOUT_MS: u64 = 2000;

// =============================================================================
// Listener Lifecycle Defaults
// =============================================================================

/// Re-attach delay after a navigation on the general-purpose variant.
pub const DEFAULT_GENERAL_REATTACH_DELAY_MS: u64 = 1000;

/// Re-attach delay after a navigation on the hosted-app variant.
pub const DEFAULT_HOSTED_REATTACH_DELAY_MS: u64 = 1500;

/// Delay before the first readiness poll on the hosted-app variant.
pub const DEFAULT_READINESS_INITIAL_DELAY_MS: u64 = 500;

/// Interval between readiness polls on the hosted-app variant.
pub const DEFAULT_READINESS_INTERVAL_MS: u64 = 1000;

/// Readiness polls before attaching unconditionally.
pub const DEFAULT_READINESS_MAX_ATTEMPTS: u32 = 15;

/// Interval at which the location watcher polls for navigation.
pub const DEFAULT_LOCATION_POLL_MS: u64 = 250;

// =============================================================================
// Chat-Completion API Defaults
// =============================================================================

/// Default chat-completion API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat-completion model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Default maximum number of retries for rate-limited requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Maximum allowed value for max_retries.
pub const MAX_MAX_RETRIES: usize = 10;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Search URL Defaults
// =============================================================================

/// Default wiki search URL prefix (query is appended percent-encoded).
pub const DEFAULT_CONFLUENCE_SEARCH_URL: &str = "https://datadoghq.atlassian.net/wiki/search?text=";

/// Default documentation search URL prefix.
pub const DEFAULT_DOCS_SEARCH_URL: &str =
    "https://docs.datadoghq.com/search/?lang_pref=en&site=us&s=";

/// Default ticket search URL prefix.
pub const DEFAULT_TICKET_SEARCH_URL: &str =
    "https://datadog.zendesk.com/agent/search/1?type=ticket&q=";

/// Generated search URLs longer than this are rejected.
pub const MAX_SEARCH_URL_LEN: usize = 2000;

// =============================================================================
// Runtime Defaults
// =============================================================================

/// Default channel capacity for host event channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Service name used for keyring storage.
pub const KEYRING_SERVICE: &str = "selchord";
