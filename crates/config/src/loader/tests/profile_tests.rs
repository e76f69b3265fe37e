//! Profile loading tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test loading configuration from profile files.
//! - Test error handling for missing profiles.
//! - Test profile override behavior with builder methods.

use secrecy::ExposeSecret;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use crate::keybind::PhysicalKey;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::{ActionId, SuppressionPolicy, Variant};

/// Creates a test configuration file with predefined profiles.
pub fn create_test_config_file(dir: &std::path::Path) -> PathBuf {
    let config_path = dir.join("config.json");

    let config = serde_json::json!({
        "profiles": {
            "work": {
                "api_key": "sk-work-123",
                "model": "gpt-4o-mini",
                "timeout_seconds": 60,
                "max_retries": 5,
                "variant": "hosted",
                "window_ms": 300,
                "search_urls": { "docs": "https://docs.example.com/search?q=" }
            },
            "personal": {
                "base_url": "https://llm.example.com/v1/",
                "bindings": "K=translate-japanese"
            }
        }
    });

    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(file, "{}", config).unwrap();

    config_path
}

#[test]
fn test_loader_from_profile_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    let config = ConfigLoader::new()
        .with_profile_name("work".to_string())
        .with_config_path(config_path)
        .from_profile()
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(
        config.api.api_key.as_ref().map(|k| k.expose_secret().to_string()),
        Some("sk-work-123".to_string())
    );
    assert_eq!(config.api.model, "gpt-4o-mini");
    assert_eq!(config.api.timeout, Duration::from_secs(60));
    assert_eq!(config.api.max_retries, 5);
    assert_eq!(config.variant, Variant::Hosted);
    assert_eq!(config.detector.suppression, SuppressionPolicy::Always);
    assert_eq!(config.detector.window, Duration::from_millis(300));
    assert_eq!(config.bindings.len(), 6);
    assert_eq!(config.search_urls.docs, "https://docs.example.com/search?q=");
}

#[test]
fn test_profile_bindings_and_base_url_normalized() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    let config = ConfigLoader::new()
        .with_profile_name("personal".to_string())
        .with_config_path(config_path)
        .from_profile()
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.api.base_url, "https://llm.example.com/v1");
    assert_eq!(config.bindings.len(), 1);
    assert_eq!(config.bindings[0].key, PhysicalKey::Letter('K'));
    assert_eq!(config.bindings[0].action, ActionId::TranslateJapanese);
}

#[test]
fn test_builder_overrides_profile() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    let config = ConfigLoader::new()
        .with_profile_name("work".to_string())
        .with_config_path(config_path)
        .from_profile()
        .unwrap()
        .with_model("gpt-4.1".to_string())
        .with_variant(Variant::General)
        .build()
        .unwrap();

    assert_eq!(config.api.model, "gpt-4.1");
    assert_eq!(config.variant, Variant::General);
    assert_eq!(config.bindings.len(), 2);
}

#[test]
fn test_missing_profile_is_error_without_key() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    let result = ConfigLoader::new()
        .with_profile_name("nope".to_string())
        .with_config_path(config_path)
        .from_profile()
        .unwrap()
        .build();

    assert!(matches!(result, Err(ConfigError::ProfileNotFound(name)) if name == "nope"));
}

#[test]
fn test_missing_profile_tolerated_when_key_supplied() {
    let temp_dir = TempDir::new().unwrap();

    let config = ConfigLoader::new()
        .with_profile_name("nope".to_string())
        .with_config_path(temp_dir.path().join("absent.json"))
        .from_profile()
        .unwrap()
        .with_api_key("sk-cli".to_string())
        .build()
        .unwrap();

    assert!(config.api.api_key.is_some());
}

#[test]
fn test_invalid_profile_file_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, "{ not json").unwrap();

    let result = ConfigLoader::new()
        .with_profile_name("work".to_string())
        .with_config_path(config_path)
        .from_profile();

    assert!(matches!(result, Err(ConfigError::ConfigFileParse { .. })));
}
