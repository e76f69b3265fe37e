//! Profile configuration types for selchord.
//!
//! Responsibilities:
//! - Define `ProfileConfig` for storing named profiles in the config file.
//! - Support partial configuration (all fields optional).
//!
//! Does NOT handle:
//! - Profile loading or merging (see `loader` module).
//! - Reading the config file (see `persistence` module).
//!
//! Invariants:
//! - All fields are optional to allow partial profile definitions.
//! - The API key uses `SecureValue` for flexible secret storage.

use serde::{Deserialize, Serialize};

use crate::types::auth::SecureValue;
use crate::types::{SearchUrls, Variant};

/// Named profile stored in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Chat-completion API base URL
    pub base_url: Option<String>,
    /// API key, plain or keyring-backed
    pub api_key: Option<SecureValue>,
    /// Model identifier
    pub model: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: Option<usize>,
    /// Deployment variant
    pub variant: Option<Variant>,
    /// Chord window in milliseconds
    pub window_ms: Option<u64>,
    /// Binding list, e.g. "J=translate-japanese,C=translate-chinese"
    pub bindings: Option<String>,
    /// Search URL prefixes
    pub search_urls: Option<SearchUrls>,
}
