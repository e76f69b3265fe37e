//! Integration tests for configuration loading through the public API.
//!
//! These tests verify end-to-end config loading behavior, ensuring that
//! the ConfigLoader builder chain works the way the CLI drives it.

use selchord_config::{
    ActionId, ConfigLoader, PhysicalKey, Variant, env_var_or_none, parse_bindings,
};
use std::time::Duration;

/// Builder values (CLI args) take precedence over defaults.
#[test]
fn test_config_loader_cli_overrides() {
    let config = ConfigLoader::new()
        .with_api_key("sk-cli".to_string())
        .with_variant(Variant::Hosted)
        .with_window(Duration::from_millis(350))
        .build()
        .expect("should build with CLI overrides");

    assert!(config.api.api_key.is_some());
    assert_eq!(config.variant, Variant::Hosted);
    assert_eq!(config.detector.window, Duration::from_millis(350));
    assert!(config.detector.readiness.is_some());
}

#[test]
fn test_env_var_or_none_exported() {
    let _result: Option<String> = env_var_or_none("SELCHORD_MODEL");
}

#[test]
fn test_parsed_bindings_feed_the_builder() {
    let bindings = parse_bindings("KeyJ=translate-japanese,Digit1=translate").unwrap();
    let config = ConfigLoader::new().with_bindings(bindings).build().unwrap();

    assert_eq!(config.bindings[0].key, PhysicalKey::Letter('J'));
    assert_eq!(config.bindings[1].key, PhysicalKey::Digit(1));
    assert_eq!(config.bindings[1].action, ActionId::Translate);
}
