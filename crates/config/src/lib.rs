//! Configuration management for selchord.
//!
//! This crate provides the shared constants, physical-key and binding parsing,
//! and the loaders that assemble a [`Config`] from `.env` files, environment
//! variables, JSON profile files, and explicit builder overrides.

pub mod constants;
pub mod keybind;
mod loader;
pub mod persistence;
pub mod types;

pub use keybind::{
    BindingSpec, KeybindError, PhysicalKey, parse_bindings, parse_physical_key, validate_bindings,
};
pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{
    ActionId, ApiConfig, Config, DetectorSettings, ProfileConfig, ReadinessSettings, SearchUrls,
    SecureValue, SuppressionPolicy, UnknownActionError, Variant,
};
