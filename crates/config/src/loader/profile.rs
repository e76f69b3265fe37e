//! Profile file loading for configuration.
//!
//! Responsibilities:
//! - Load a named profile from the JSON config file.
//! - Apply profile settings to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Environment variable parsing (see env.rs).
//! - Building the final Config (see builder.rs).
//!
//! Invariants:
//! - Profile settings are applied before environment variables (env vars take precedence).
//! - Missing profiles are recorded for later error handling in build().

use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::keybind::parse_bindings;
use crate::persistence::{default_config_path, read_config_file};
use crate::types::ProfileConfig;

/// Apply profile configuration from the config file to the loader.
///
/// If the file or profile is not found, this records the missing profile name
/// for later error handling in `build()`.
pub fn apply_profile(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let profile_name = match loader.profile_name() {
        Some(name) => name.clone(),
        None => return Ok(()),
    };

    let config_path = if let Some(path) = loader.config_path() {
        path.clone()
    } else {
        default_config_path().map_err(|e| ConfigError::ConfigDirUnavailable(e.to_string()))?
    };

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "Config file not found");
        loader.set_profile_missing(Some(profile_name));
        return Ok(());
    }

    let file = read_config_file(&config_path)?;
    let profile = match file.profiles.get(&profile_name) {
        Some(p) => p,
        None => {
            loader.set_profile_missing(Some(profile_name));
            return Ok(());
        }
    };

    tracing::debug!(profile = %profile_name, "Applying profile");
    apply_profile_config(loader, profile)
}

/// Apply profile configuration values to the loader.
fn apply_profile_config(
    loader: &mut ConfigLoader,
    profile: &ProfileConfig,
) -> Result<(), ConfigError> {
    if let Some(url) = &profile.base_url {
        loader.set_base_url(Some(url.clone()));
    }
    if let Some(key) = &profile.api_key {
        loader.set_api_key(Some(key.resolve()?));
    }
    if let Some(model) = &profile.model {
        loader.set_model(Some(model.clone()));
    }
    if let Some(secs) = profile.timeout_seconds {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = profile.max_retries {
        loader.set_max_retries(Some(retries));
    }
    if let Some(variant) = profile.variant {
        loader.set_variant(Some(variant));
    }
    if let Some(ms) = profile.window_ms {
        loader.set_window(Some(Duration::from_millis(ms)));
    }
    if let Some(bindings) = &profile.bindings {
        loader.set_bindings(Some(parse_bindings(bindings)?));
    }
    if let Some(urls) = &profile.search_urls {
        loader.set_search_urls(Some(urls.clone()));
    }
    Ok(())
}
