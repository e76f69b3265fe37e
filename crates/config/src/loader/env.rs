//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `SELCHORD_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading from profile files (see profile.rs).
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Environment variables take precedence over profile settings.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::keybind::parse_bindings;
use crate::types::Variant;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_number<T: std::str::FromStr>(
    var: &str,
    value: &str,
    expected: &str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        message: expected.to_string(),
    })
}

/// Apply environment variable configuration to the loader.
///
/// Environment variables take precedence over profile settings.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let api_key =
        env_var_or_none("SELCHORD_API_KEY").or_else(|| env_var_or_none("OPENAI_API_KEY"));
    if let Some(key) = api_key {
        loader.set_api_key(Some(SecretString::new(key.into())));
    }
    if let Some(url) = env_var_or_none("SELCHORD_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(model) = env_var_or_none("SELCHORD_MODEL") {
        loader.set_model(Some(model));
    }
    if let Some(timeout) = env_var_or_none("SELCHORD_TIMEOUT") {
        let secs: u64 = parse_number("SELCHORD_TIMEOUT", &timeout, "must be a number")?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = env_var_or_none("SELCHORD_MAX_RETRIES") {
        let value: usize = parse_number(
            "SELCHORD_MAX_RETRIES",
            &retries,
            "must be a non-negative integer",
        )?;
        loader.set_max_retries(Some(value));
    }
    if let Some(variant) = env_var_or_none("SELCHORD_VARIANT") {
        let variant: Variant = variant.parse().map_err(|message| ConfigError::InvalidValue {
            var: "SELCHORD_VARIANT".to_string(),
            message,
        })?;
        loader.set_variant(Some(variant));
    }
    if let Some(window) = env_var_or_none("SELCHORD_WINDOW_MS") {
        let ms: u64 = parse_number(
            "SELCHORD_WINDOW_MS",
            &window,
            "must be a number of milliseconds",
        )?;
        loader.set_window(Some(Duration::from_millis(ms)));
    }
    if let Some(bindings) = env_var_or_none("SELCHORD_BINDINGS") {
        let specs = parse_bindings(&bindings).map_err(|e| ConfigError::InvalidValue {
            var: "SELCHORD_BINDINGS".to_string(),
            message: e.to_string(),
        })?;
        loader.set_bindings(Some(specs));
    }

    // Config path and profile name from environment (only if not already set via CLI)
    if loader.config_path().is_none()
        && let Some(config_path) = env_var_or_none("SELCHORD_CONFIG_PATH")
    {
        loader.set_config_path(Some(std::path::PathBuf::from(config_path)));
    }
    if loader.profile_name().is_none()
        && let Some(profile) = env_var_or_none("SELCHORD_PROFILE")
    {
        loader.set_profile_name(Some(profile));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key1 = "_SELCHORD_TEST_UNSET_VAR";
        assert!(env_var_or_none(key1).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key1, Some(""))], || {
            assert!(env_var_or_none(key1).is_none(), "Empty string env var should return None");
        });

        temp_env::with_vars([(key1, Some("   "))], || {
            assert!(
                env_var_or_none(key1).is_none(),
                "Whitespace-only env var should return None"
            );
        });

        let key2 = "_SELCHORD_TEST_SET_VAR";
        temp_env::with_vars([(key2, Some(" test-value "))], || {
            assert_eq!(
                env_var_or_none(key2),
                Some("test-value".to_string()),
                "Non-empty env var should return Some(trimmed value)"
            );
        });
    }
}
