//! API and top-level configuration types for selchord.
//!
//! Responsibilities:
//! - Define chat-completion API settings (URL, key, model, timeout, retries).
//! - Define search URL prefixes used by search actions.
//! - Define the main `Config` structure combining API, detector and bindings.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - The API key is optional here; its absence is reported at call time.
//! - Default values come from `constants`, not magic numbers.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CONFLUENCE_SEARCH_URL, DEFAULT_DOCS_SEARCH_URL,
    DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_TICKET_SEARCH_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::keybind::BindingSpec;
use crate::types::{DetectorSettings, Variant};

/// Chat-completion API settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API (e.g., https://api.openai.com/v1)
    pub base_url: String,
    /// Bearer key, if configured
    pub api_key: Option<SecretString>,
    /// Model identifier
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Search URL prefixes. The percent-encoded query is appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchUrls {
    /// Wiki search prefix
    pub confluence: String,
    /// Documentation search prefix
    pub docs: String,
    /// Ticket search prefix
    pub tickets: String,
}

impl Default for SearchUrls {
    fn default() -> Self {
        Self {
            confluence: DEFAULT_CONFLUENCE_SEARCH_URL.to_string(),
            docs: DEFAULT_DOCS_SEARCH_URL.to_string(),
            tickets: DEFAULT_TICKET_SEARCH_URL.to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment variant
    pub variant: Variant,
    /// Chat-completion API settings
    pub api: ApiConfig,
    /// Detector timing and policy
    pub detector: DetectorSettings,
    /// Chord bindings, validated conflict-free
    pub bindings: Vec<BindingSpec>,
    /// Search URL prefixes
    pub search_urls: SearchUrls,
}

impl Config {
    /// Default configuration for a variant with no API key.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            api: ApiConfig::default(),
            detector: DetectorSettings::for_variant(variant),
            bindings: variant.default_bindings(),
            search_urls: SearchUrls::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_variant(Variant::General)
    }
}
